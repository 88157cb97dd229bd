//! Entropic density field the agent reasons about

use super::states::NVec2;

/// Inside this radius the density is clamped to [`SINGULARITY_DENSITY`]
pub const SINGULARITY_RADIUS: f64 = 1.0;
pub const SINGULARITY_DENSITY: f64 = 1000.0;

/// Density at `x`: 1/d² outside the core, a fixed cutoff inside it
pub fn density(x: &NVec2) -> f64 {
    let d = x.norm();
    if d < SINGULARITY_RADIUS {
        return SINGULARITY_DENSITY;
    }
    1.0 / (d * d)
}

/// Density at the straight-line projection `x + v·horizon`
pub fn predict_density(x: &NVec2, v: &NVec2, horizon: u32) -> f64 {
    let projected = x + v * f64::from(horizon);
    density(&projected)
}

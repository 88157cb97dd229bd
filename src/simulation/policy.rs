//! Conscious decision policy
//!
//! The agent samples the entropic density `horizon` steps ahead along its
//! current velocity. If the projection lands somewhere denser than where it is
//! now it accelerates along the radial unit `-x/|x|`; otherwise it pushes
//! along its velocity's left-hand tangent at half strength to hold an orbit.
//! Thermal noise is added on top of either choice.
//!
//! The comparison is a single-sample threshold with no hysteresis, so an agent
//! sitting near `future == current` can flip modes every step.

use crate::error::{Result, SimError};
use super::entropy::{density, predict_density};
use super::noise::NoiseSource;
use super::states::{radial_unit, tangential_unit, Agent, NVec2};

pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Fraction of the strength used for orbit maintenance
pub const TANGENTIAL_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Density predicted to rise: radial push
    Radial,
    /// Density flat or falling: tangential push
    Tangential,
}

/// Pick the policy branch for the given state, without noise
pub fn choose_mode(x: &NVec2, v: &NVec2, horizon: u32) -> Mode {
    let current = density(x);
    let future = predict_density(x, v, horizon);
    if future > current {
        Mode::Radial
    } else {
        Mode::Tangential
    }
}

/// Noise-free part of the policy
pub fn steering(x: &NVec2, v: &NVec2, horizon: u32, strength: f64) -> Result<NVec2> {
    let radial = radial_unit(x)?;
    let accel = match choose_mode(x, v, horizon) {
        Mode::Radial => radial * strength,
        Mode::Tangential => tangential_unit(v) * strength * TANGENTIAL_FACTOR,
    };
    Ok(accel)
}

/// Conscious acceleration for a body at `x` moving with `v`
///
/// Fails with [`SimError::DegenerateDirection`] when `x` is the origin and
/// with [`SimError::InvalidParameter`] for a zero horizon, a non-positive
/// strength or a negative temperature.
pub fn decide<N>(
    x: &NVec2,
    v: &NVec2,
    horizon: u32,
    strength: f64,
    temperature: f64,
    noise: &mut N,
) -> Result<NVec2>
where
    N: NoiseSource + ?Sized,
{
    if horizon == 0 {
        return Err(SimError::InvalidParameter("horizon must be at least 1".into()));
    }
    if !(strength > 0.0) {
        return Err(SimError::InvalidParameter(format!("strength must be positive, got {strength}")));
    }
    if !(temperature >= 0.0) {
        return Err(SimError::InvalidParameter(format!("temperature must be non-negative, got {temperature}")));
    }

    let accel = steering(x, v, horizon, strength)?;
    Ok(accel + noise.gaussian_vec(temperature))
}

impl Agent {
    /// Run the policy with this agent's own horizon and strength
    pub fn decide<N>(&self, temperature: f64, noise: &mut N) -> Result<NVec2>
    where
        N: NoiseSource + ?Sized,
    {
        decide(&self.body.x, &self.body.v, self.horizon, self.strength, temperature, noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::noise::{NoNoise, SeededNoise};

    #[test]
    fn infall_selects_radial_branch() {
        // projection (10,0) + 5·(-1,0) = (5,0) is denser than (10,0)
        let x = NVec2::new(10.0, 0.0);
        let v = NVec2::new(-1.0, 0.0);
        assert_eq!(choose_mode(&x, &v, 5), Mode::Radial);

        let a = decide(&x, &v, 5, 0.1, 0.1, &mut NoNoise).unwrap();
        assert!((a - NVec2::new(-0.1, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn circular_motion_selects_tangential_branch() {
        // projection (10,5) is farther out than (10,0)
        let x = NVec2::new(10.0, 0.0);
        let v = NVec2::new(0.0, 1.0);
        assert_eq!(choose_mode(&x, &v, 5), Mode::Tangential);

        let a = decide(&x, &v, 5, 0.1, 0.1, &mut NoNoise).unwrap();
        // tangent of (0,1) is (-1,0), at half strength
        assert!((a - NVec2::new(-0.05, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn equal_density_is_not_infall() {
        // inside the singularity core both samples are 1000.0
        let x = NVec2::new(0.5, 0.0);
        let v = NVec2::new(0.0, 0.01);
        assert_eq!(choose_mode(&x, &v, 1), Mode::Tangential);
    }

    #[test]
    fn zero_velocity_uses_fallback_tangent() {
        let x = NVec2::new(3.0, 4.0);
        let a = decide(&x, &NVec2::zeros(), 5, 1.0, 0.0, &mut NoNoise).unwrap();
        assert_eq!(a, NVec2::new(0.5, 0.0));
    }

    #[test]
    fn origin_is_degenerate() {
        let err = decide(&NVec2::zeros(), &NVec2::new(1.0, 0.0), 5, 0.1, 0.1, &mut NoNoise);
        assert!(matches!(err, Err(SimError::DegenerateDirection(_))));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let x = NVec2::new(10.0, 0.0);
        let v = NVec2::new(0.0, 1.0);
        assert!(matches!(decide(&x, &v, 0, 0.1, 0.1, &mut NoNoise), Err(SimError::InvalidParameter(_))));
        assert!(matches!(decide(&x, &v, 5, -0.1, 0.1, &mut NoNoise), Err(SimError::InvalidParameter(_))));
        assert!(matches!(decide(&x, &v, 5, 0.1, -1.0, &mut NoNoise), Err(SimError::InvalidParameter(_))));
    }

    #[test]
    fn noise_only_perturbs_around_steering() {
        let x = NVec2::new(10.0, 0.0);
        let v = NVec2::new(0.0, 1.0);
        let base = steering(&x, &v, 5, 0.1).unwrap();

        let mut a = SeededNoise::new(3);
        let mut b = SeededNoise::new(3);
        let da = decide(&x, &v, 5, 0.1, 0.1, &mut a).unwrap();
        let db = decide(&x, &v, 5, 0.1, 0.1, &mut b).unwrap();
        assert_eq!(da, db);
        assert_ne!(da, base);
        assert!((da - base).norm() < 1.0);
    }
}

//! Central force laws for the galaxy field
//!
//! Two radial regimes around a fixed central mass:
//! - [`NewtonianGravity`]: a = G·M / r²
//! - [`VerlindeGravity`]:  Newtonian while a_N >= A_0, sqrt(a_N·A_0) below it
//!
//! Below the acceleration floor `A_0` the Verlinde law decays as 1/r instead of
//! 1/r², which is what flattens the rotation curve at large radius.

use crate::error::Result;
use super::states::{radial_unit, NVec2};

pub const G: f64 = 1.0; // gravitational constant
pub const CENTRAL_MASS: f64 = 1000.0; // mass at the origin
pub const A_0: f64 = 0.2; // acceleration floor for the Verlinde transition

/// Which force law to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Newton,
    Verlinde,
}

/// A scalar radial force law, magnitude only (always attractive)
pub trait RadialForce {
    /// Acceleration magnitude at distance `r > 0`
    fn radial_acceleration(&self, r: f64) -> f64;

    /// Speed of a circular orbit at `r`: v² / r = a(r)
    fn stable_orbit_speed(&self, r: f64) -> f64 {
        (self.radial_acceleration(r) * r).sqrt()
    }
}

/// Inverse-square attraction toward the origin
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64,
    pub M: f64,
}

impl RadialForce for NewtonianGravity {
    fn radial_acceleration(&self, r: f64) -> f64 {
        self.G * self.M / (r * r)
    }
}

/// Newtonian gravity that switches to the deep regime below `a0`
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct VerlindeGravity {
    pub G: f64,
    pub M: f64,
    pub a0: f64,
}

impl RadialForce for VerlindeGravity {
    fn radial_acceleration(&self, r: f64) -> f64 {
        let a_n = self.G * self.M / (r * r);
        if a_n >= self.a0 {
            a_n
        } else {
            // continuous at a_n == a0
            (a_n * self.a0).sqrt()
        }
    }
}

/// Constants shared by both regimes
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    pub G: f64,
    pub mass: f64,
    pub a0: f64,
}

impl Default for ForceField {
    fn default() -> Self {
        Self {
            G: G,
            mass: CENTRAL_MASS,
            a0: A_0,
        }
    }
}

impl ForceField {
    pub fn newton(&self) -> NewtonianGravity {
        NewtonianGravity { G: self.G, M: self.mass }
    }

    pub fn verlinde(&self) -> VerlindeGravity {
        VerlindeGravity { G: self.G, M: self.mass, a0: self.a0 }
    }

    pub fn radial_acceleration(&self, r: f64, regime: Regime) -> f64 {
        match regime {
            Regime::Newton => self.newton().radial_acceleration(r),
            Regime::Verlinde => self.verlinde().radial_acceleration(r),
        }
    }

    pub fn stable_orbit_speed(&self, r: f64, regime: Regime) -> f64 {
        match regime {
            Regime::Newton => self.newton().stable_orbit_speed(r),
            Regime::Verlinde => self.verlinde().stable_orbit_speed(r),
        }
    }

    /// Acceleration vector at `x`, pointing at the origin
    pub fn acceleration_at(&self, x: &NVec2, regime: Regime) -> Result<NVec2> {
        let dir = radial_unit(x)?;
        Ok(self.radial_acceleration(x.norm(), regime) * dir)
    }

    /// Circular orbit speed at each radius
    pub fn rotation_curve(&self, radii: &[f64], regime: Regime) -> Vec<f64> {
        radii.iter().map(|&r| self.stable_orbit_speed(r, regime)).collect()
    }
}

/// Radial acceleration magnitude with the default constants
pub fn radial_acceleration(r: f64, regime: Regime) -> f64 {
    ForceField::default().radial_acceleration(r, regime)
}

/// Circular orbit speed with the default constants
pub fn stable_orbit_speed(r: f64, regime: Regime) -> f64 {
    ForceField::default().stable_orbit_speed(r, regime)
}

/// Population standard deviation over the mean; 0 for an empty slice
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt() / mean
}

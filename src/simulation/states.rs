//! Core state types for the entropic-gravity simulation.
//!
//! Defines the 2D body types:
//! - `Body`          position, velocity and the trajectory log
//! - `Agent`         a body steered by the conscious policy
//! - `InertParticle` a galaxy body that only follows the field
//!
//! Vectors are `Copy` values, so every trajectory entry is an owned snapshot.

use nalgebra::Vector2;

use crate::error::{Result, SimError};

pub type NVec2 = Vector2<f64>;

/// Ordered positions of one body, one entry per executed step plus the start
pub type Trajectory = Vec<NVec2>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Inert,
    Agent,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    trajectory: Trajectory, // append-only, trajectory[0] is the start
}

impl Body {
    pub fn new(x: NVec2, v: NVec2) -> Self {
        Self {
            x,
            v,
            trajectory: vec![x],
        }
    }

    pub fn trajectory(&self) -> &[NVec2] {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    /// Number of integrator steps applied so far
    pub fn steps(&self) -> usize {
        self.trajectory.len() - 1
    }

    /// Distance from the origin
    pub fn radius(&self) -> f64 {
        self.x.norm()
    }

    /// Log the current position; only the integrator calls this
    pub(crate) fn record(&mut self) {
        self.trajectory.push(self.x);
    }
}

/// A body that chooses its own acceleration from predicted entropic density
#[derive(Debug, Clone)]
pub struct Agent {
    pub body: Body,
    pub horizon: u32, // look-ahead steps
    pub strength: f64, // conscious force strength
}

impl Agent {
    pub const DEFAULT_HORIZON: u32 = 5;
    pub const DEFAULT_STRENGTH: f64 = 0.1;

    /// Build an agent, rejecting a zero horizon or a non-positive strength
    pub fn new(x: NVec2, v: NVec2, horizon: u32, strength: f64) -> Result<Self> {
        if horizon == 0 {
            return Err(SimError::InvalidParameter("horizon must be at least 1".into()));
        }
        if !(strength > 0.0 && strength.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "conscious force strength must be positive, got {strength}"
            )));
        }
        Ok(Self {
            body: Body::new(x, v),
            horizon,
            strength,
        })
    }

    pub fn kind(&self) -> BodyKind {
        BodyKind::Agent
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            body: Body::new(NVec2::new(10.0, 0.0), NVec2::new(0.0, 1.0)),
            horizon: Self::DEFAULT_HORIZON,
            strength: Self::DEFAULT_STRENGTH,
        }
    }
}

/// A galaxy body on an initially circular orbit
#[derive(Debug, Clone)]
pub struct InertParticle {
    pub id: usize,
    pub body: Body,
    pub orbital_radius: f64, // radius at creation, not re-enforced
    pub kind: BodyKind,
}

impl InertParticle {
    pub fn new(id: usize, x: NVec2, v: NVec2, orbital_radius: f64) -> Self {
        Self {
            id,
            body: Body::new(x, v),
            orbital_radius,
            kind: BodyKind::Inert,
        }
    }
}

// =========================================================================================
// Direction helpers
// =========================================================================================

/// Unit vector pointing from `x` toward the origin
pub fn radial_unit(x: &NVec2) -> Result<NVec2> {
    let r = x.norm();
    if r == 0.0 {
        return Err(SimError::DegenerateDirection("position is at the origin"));
    }
    Ok(-x / r)
}

/// Unit vector `v` rotated 90° counter-clockwise
///
/// A zero velocity has no tangent, so `(1, 0)` is returned instead.
pub fn tangential_unit(v: &NVec2) -> NVec2 {
    let t = NVec2::new(-v.y, v.x);
    let n = t.norm();
    if n == 0.0 {
        return NVec2::new(1.0, 0.0);
    }
    t / n
}

/// Unit vector from `from` toward `to`
pub fn unit_toward(from: &NVec2, to: &NVec2) -> Result<NVec2> {
    let d = to - from;
    let n = d.norm();
    if n == 0.0 {
        return Err(SimError::DegenerateDirection("target coincides with position"));
    }
    Ok(d / n)
}

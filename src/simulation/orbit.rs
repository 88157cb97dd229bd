//! Single-body runs: the conscious agent, the inert baseline and a plain
//! circular orbit under one of the force regimes

use log::{debug, info};

use crate::error::{Result, SimError};
use super::analysis::ComparisonReport;
use super::entropy::SINGULARITY_RADIUS;
use super::forces::{ForceField, Regime};
use super::integrator::{euler_step, impulse_step};
use super::noise::NoiseSource;
use super::params::validate_dt;
use super::policy::DEFAULT_TEMPERATURE;
use super::states::{radial_unit, Agent, Body, NVec2, Trajectory};

/// A standalone agent farther out than this has escaped
pub const ESCAPE_RADIUS: f64 = 100.0;

/// Per-step velocity impulse pulling inert matter toward the origin
pub const INERT_ATTRACTION: f64 = 0.05;
pub const INERT_NOISE: f64 = 0.1; // std of the inert random walk
pub const DEFAULT_DT: f64 = 0.1;

/// Drive `agent` with its own policy for up to `max_steps` steps
///
/// Stops early once the agent is farther than [`ESCAPE_RADIUS`] from the
/// origin. The returned trajectory holds between 2 and `max_steps + 1`
/// positions for `max_steps >= 1`.
pub fn run_agent<'a, N>(
    agent: &'a mut Agent,
    max_steps: usize,
    dt: f64,
    temperature: f64,
    noise: &mut N,
) -> Result<&'a [NVec2]>
where
    N: NoiseSource + ?Sized,
{
    validate_dt(dt)?;

    for step in 0..max_steps {
        let a = agent.decide(temperature, noise)?;
        euler_step(&mut agent.body, a, dt);

        if agent.body.radius() > ESCAPE_RADIUS {
            info!("agent escaped past r = {ESCAPE_RADIUS} at step {step}");
            break;
        }
    }

    Ok(agent.body.trajectory())
}

/// Baseline body with a fixed inward impulse plus a random walk
///
/// Stops early once the body falls inside the singularity core.
pub fn run_inert<N>(
    x0: NVec2,
    v0: NVec2,
    max_steps: usize,
    dt: f64,
    noise: &mut N,
) -> Result<Trajectory>
where
    N: NoiseSource + ?Sized,
{
    validate_dt(dt)?;
    let mut body = Body::new(x0, v0);

    for step in 0..max_steps {
        let kick = noise.gaussian_vec(INERT_NOISE);
        let inward = radial_unit(&body.x)?;
        impulse_step(&mut body, inward * INERT_ATTRACTION + kick, dt);

        if body.radius() < SINGULARITY_RADIUS {
            debug!("inert body captured at step {step}");
            break;
        }
    }

    Ok(body.into_trajectory())
}

/// Default-tuned agent vs inert matter from the same initial state
pub fn compare<N>(x0: NVec2, v0: NVec2, steps: usize, noise: &mut N) -> Result<ComparisonReport>
where
    N: NoiseSource + ?Sized,
{
    let mut agent = Agent::new(x0, v0, Agent::DEFAULT_HORIZON, Agent::DEFAULT_STRENGTH)?;
    run_agent(&mut agent, steps, DEFAULT_DT, DEFAULT_TEMPERATURE, noise)?;
    let inert = run_inert(x0, v0, steps, DEFAULT_DT, noise)?;

    Ok(ComparisonReport::new(agent.body.into_trajectory(), inert))
}

/// Launch a body on a circular orbit of `radius` and integrate it in `field`
///
/// Returns the trajectory (`steps + 1` points) and the mean speed over the run.
pub fn circular_orbit(
    field: &ForceField,
    regime: Regime,
    radius: f64,
    steps: usize,
    dt: f64,
) -> Result<(Trajectory, f64)> {
    validate_dt(dt)?;
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(SimError::InvalidParameter(format!("orbit radius must be positive, got {radius}")));
    }

    let speed = field.stable_orbit_speed(radius, regime);
    let mut body = Body::new(NVec2::new(radius, 0.0), NVec2::new(0.0, speed));

    let mut speed_sum = 0.0;
    for _ in 0..steps {
        let a = field.acceleration_at(&body.x, regime)?;
        euler_step(&mut body, a, dt);
        speed_sum += body.v.norm();
    }

    let mean_speed = if steps == 0 { speed } else { speed_sum / steps as f64 };
    Ok((body.into_trajectory(), mean_speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::noise::{NoNoise, SeededNoise};

    #[test]
    fn agent_run_without_escape_uses_every_step() {
        let mut agent = Agent::default();
        let traj = run_agent(&mut agent, 10, 0.1, 0.1, &mut SeededNoise::new(11)).unwrap();
        assert_eq!(traj.len(), 11);
        assert_eq!(traj[0], NVec2::new(10.0, 0.0));
    }

    #[test]
    fn agent_run_stops_at_escape_radius() {
        // already moving outward fast enough to cross r = 100 in a few steps
        let mut agent = Agent::new(NVec2::new(99.0, 0.0), NVec2::new(50.0, 0.0), 5, 0.1).unwrap();
        let traj = run_agent(&mut agent, 1000, 0.1, 0.0, &mut NoNoise).unwrap();
        assert_eq!(traj.len(), 2);
        assert!(traj[1].norm() > ESCAPE_RADIUS);
    }

    #[test]
    fn agent_run_rejects_bad_dt() {
        let mut agent = Agent::default();
        assert!(run_agent(&mut agent, 10, 0.0, 0.1, &mut NoNoise).is_err());
        assert_eq!(agent.body.steps(), 0);
    }

    #[test]
    fn inert_body_is_captured() {
        // straight fall, no noise: the impulse accumulates until r < 1
        let traj = run_inert(NVec2::new(5.0, 0.0), NVec2::zeros(), 10_000, 0.1, &mut NoNoise).unwrap();
        assert!(traj.len() < 10_001);
        assert!(traj.last().unwrap().norm() < SINGULARITY_RADIUS);
    }

    #[test]
    fn inert_body_falls_inward_without_noise() {
        let traj = run_inert(NVec2::new(10.0, 0.0), NVec2::zeros(), 3, 0.1, &mut NoNoise).unwrap();
        // v: -0.05, -0.10, -0.15 ; x: 10 - 0.005 - 0.010 - 0.015
        assert_eq!(traj.len(), 4);
        assert!((traj[3].x - 9.97).abs() < 1e-12);
    }

    #[test]
    fn circular_orbit_has_requested_length() {
        let field = ForceField::default();
        let (traj, mean_speed) = circular_orbit(&field, Regime::Newton, 10.0, 100, 0.01).unwrap();
        assert_eq!(traj.len(), 101);
        assert!((traj[0].norm() - 10.0).abs() < 1e-12);
        assert!(mean_speed > 0.0);
    }
}

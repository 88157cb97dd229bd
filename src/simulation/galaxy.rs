//! # Galaxy of inert particles plus one conscious agent
//!
//! Inert particles are placed on log-spaced radii between [`INNER_RADIUS`] and
//! the galaxy radius. Each starts at a uniformly random angle and moves
//! counter-clockwise at the Verlinde circular-orbit speed for its radius. Each
//! step they fall under the Verlinde field and nothing else. Particles do not
//! interact with each other or with the agent.
//!
//! The agent feels no gravity directly. Its acceleration is chosen every step:
//! - no goal: the standalone conscious policy,
//! - within [`ARRIVAL_RADIUS`] of the goal: zero (it coasts),
//! - otherwise: cancel a `strength` fraction of the local pull, seek the goal
//!   at half strength, plus decision noise.
//!
//! A galaxy run ends when the step budget is spent, the agent passes
//! `1.2 × galaxy_radius`, or it gets within [`ARRIVAL_RADIUS`] of its goal.

use log::{debug, info};

use crate::error::{Result, SimError};
use super::analysis::{AgentReport, GalaxyReport};
use super::forces::{ForceField, Regime};
use super::integrator::euler_step;
use super::noise::NoiseSource;
use super::params::validate_dt;
use super::policy::{self, DEFAULT_TEMPERATURE};
use super::states::{unit_toward, Agent, InertParticle, NVec2};

pub const INNER_RADIUS: f64 = 5.0; // innermost particle orbit
pub const AGENT_HORIZON: u32 = 10;
pub const AGENT_STRENGTH: f64 = 0.5;
pub const GOAL_FACTOR: f64 = 1.5; // default goal distance, in galaxy radii
pub const ESCAPE_FACTOR: f64 = 1.2; // escape distance, in galaxy radii
pub const ARRIVAL_RADIUS: f64 = 5.0;
pub const AGENT_NOISE: f64 = 0.1; // std of the goal-seeking noise

pub const DEFAULT_GALAXY_RADIUS: f64 = 100.0;
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
pub const DEFAULT_AGENT_POSITION: [f64; 2] = [20.0, 0.0];
pub const DEFAULT_AGENT_VELOCITY: [f64; 2] = [0.0, 2.0];

#[derive(Debug, Clone)]
pub struct Galaxy {
    pub galaxy_radius: f64,
    pub particle_count: usize,
    pub central_mass: f64, // recorded only, the field carries its own mass
    field: ForceField,
    particles: Vec<InertParticle>,
    agent: Option<Agent>,
    goal: Option<NVec2>,
    temperature: f64, // noise for the goal-less policy
    steps: usize,
}

impl Galaxy {
    /// Galaxy in the default force field
    pub fn new<N>(galaxy_radius: f64, particle_count: usize, central_mass: f64, noise: &mut N) -> Result<Self>
    where
        N: NoiseSource + ?Sized,
    {
        Self::with_field(ForceField::default(), galaxy_radius, particle_count, central_mass, noise)
    }

    pub fn with_field<N>(
        field: ForceField,
        galaxy_radius: f64,
        particle_count: usize,
        central_mass: f64,
        noise: &mut N,
    ) -> Result<Self>
    where
        N: NoiseSource + ?Sized,
    {
        if !(galaxy_radius > 0.0 && galaxy_radius.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "galaxy radius must be positive, got {galaxy_radius}"
            )));
        }
        if !central_mass.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "central mass must be finite, got {central_mass}"
            )));
        }

        let radii = logspace(INNER_RADIUS, galaxy_radius, particle_count);
        let particles: Vec<InertParticle> = radii
            .iter()
            .enumerate()
            .map(|(id, &r)| {
                let theta = noise.uniform(0.0, std::f64::consts::TAU);
                let (sin, cos) = theta.sin_cos();
                let speed = field.stable_orbit_speed(r, Regime::Verlinde);

                let x = NVec2::new(r * cos, r * sin);
                let v = NVec2::new(-speed * sin, speed * cos); // perpendicular to x
                InertParticle::new(id, x, v, r)
            })
            .collect();

        debug!(
            "galaxy built: radius {galaxy_radius}, {} particles, central mass {central_mass}",
            particles.len()
        );

        Ok(Self {
            galaxy_radius,
            particle_count,
            central_mass,
            field,
            particles,
            agent: None,
            goal: None,
            temperature: DEFAULT_TEMPERATURE,
            steps: 0,
        })
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    pub fn particles(&self) -> &[InertParticle] {
        &self.particles
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn goal(&self) -> Option<NVec2> {
        self.goal
    }

    /// Replace the goal; `None` hands the agent back to the plain policy
    pub fn set_goal(&mut self, goal: Option<NVec2>) {
        self.goal = goal;
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        if !(temperature >= 0.0 && temperature.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "temperature must be a finite non-negative number, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(())
    }

    /// Steps executed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn escape_radius(&self) -> f64 {
        ESCAPE_FACTOR * self.galaxy_radius
    }

    /// Put a fresh agent in the galaxy, dropping any previous one
    ///
    /// Horizon and strength are always [`AGENT_HORIZON`] and
    /// [`AGENT_STRENGTH`]. Without an explicit goal the agent aims for
    /// `1.5 × galaxy_radius` along its starting direction, which fails for a
    /// start at the origin.
    pub fn add_agent(&mut self, x0: NVec2, v0: NVec2, goal: Option<NVec2>) -> Result<()> {
        let goal = match goal {
            Some(g) => g,
            None => unit_toward(&NVec2::zeros(), &x0)? * GOAL_FACTOR * self.galaxy_radius,
        };
        let agent = Agent::new(x0, v0, AGENT_HORIZON, AGENT_STRENGTH)?;

        debug!("agent added at ({:.2}, {:.2}), goal ({:.2}, {:.2})", x0.x, x0.y, goal.x, goal.y);
        self.agent = Some(agent);
        self.goal = Some(goal);
        Ok(())
    }

    /// Agent at (20, 0) moving at (0, 2) toward the default goal
    pub fn add_default_agent(&mut self) -> Result<()> {
        self.add_agent(DEFAULT_AGENT_POSITION.into(), DEFAULT_AGENT_VELOCITY.into(), None)
    }

    /// Acceleration the agent chooses in its current state
    fn steer<N>(&self, agent: &Agent, noise: &mut N) -> Result<NVec2>
    where
        N: NoiseSource + ?Sized,
    {
        let Some(goal) = self.goal else {
            return policy::decide(
                &agent.body.x,
                &agent.body.v,
                agent.horizon,
                agent.strength,
                self.temperature,
                noise,
            );
        };

        if (goal - agent.body.x).norm() < ARRIVAL_RADIUS {
            return Ok(NVec2::zeros());
        }

        let pull = self.field.acceleration_at(&agent.body.x, Regime::Verlinde)?;
        let counter_gravity = -pull * agent.strength;
        let seek = unit_toward(&agent.body.x, &goal)? * agent.strength * 0.5;

        Ok(counter_gravity + seek + noise.gaussian_vec(AGENT_NOISE))
    }

    /// Advance every particle and the agent by one step
    pub fn advance<N>(&mut self, dt: f64, noise: &mut N) -> Result<()>
    where
        N: NoiseSource + ?Sized,
    {
        validate_dt(dt)?;

        for p in self.particles.iter_mut() {
            let a = self.field.acceleration_at(&p.body.x, Regime::Verlinde)?;
            euler_step(&mut p.body, a, dt);
        }

        // decide against the pre-step state, then integrate
        let accel = match &self.agent {
            Some(agent) => Some(self.steer(agent, noise)?),
            None => None,
        };
        if let (Some(agent), Some(a)) = (self.agent.as_mut(), accel) {
            euler_step(&mut agent.body, a, dt);
        }

        self.steps += 1;
        Ok(())
    }

    pub fn agent_escaped(&self) -> bool {
        self.agent
            .as_ref()
            .is_some_and(|a| a.body.radius() > self.escape_radius())
    }

    pub fn agent_at_goal(&self) -> bool {
        match (&self.agent, self.goal) {
            (Some(a), Some(g)) => (g - a.body.x).norm() < ARRIVAL_RADIUS,
            _ => false,
        }
    }

    /// Run up to `steps` steps, stopping at escape or arrival
    pub fn simulate<N>(&mut self, steps: usize, dt: f64, noise: &mut N) -> Result<GalaxyReport>
    where
        N: NoiseSource + ?Sized,
    {
        validate_dt(dt)?;
        info!("simulating galaxy with {} inert particles for up to {steps} steps", self.particles.len());

        for step in 0..steps {
            self.advance(dt, noise)?;

            if self.agent.is_none() {
                continue;
            }
            if self.agent_escaped() {
                info!("agent escaped the galaxy at step {step}");
                break;
            }
            if self.agent_at_goal() {
                info!("agent reached its goal at step {step}");
                break;
            }
        }

        Ok(self.report())
    }

    /// Summary of the current state
    pub fn report(&self) -> GalaxyReport {
        let agent = self.agent.as_ref().map(|a| AgentReport {
            trajectory: a.body.trajectory().to_vec(),
            final_position: a.body.x,
            final_distance: a.body.radius(),
        });

        GalaxyReport {
            galaxy_radius: self.galaxy_radius,
            particle_count: self.particles.len(),
            particle_trajectories: self.particles.iter().map(|p| p.body.trajectory().to_vec()).collect(),
            agent,
            goal: self.goal,
            steps: self.steps,
            escaped: self.agent_escaped(),
            reached_goal: self.agent_at_goal(),
        }
    }
}

/// `n` values spaced evenly in log space from `start` to `stop` inclusive
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (l0, l1) = (start.ln(), stop.ln());
            let span = (n - 1) as f64;
            (0..n).map(|i| (l0 + (l1 - l0) * i as f64 / span).exp()).collect()
        }
    }
}

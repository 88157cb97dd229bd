//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - force field constants (`ForceField`)
//! - the seeded noise source every stochastic step draws from
//! - the simulation itself: an orbit comparison or a galaxy
//!
//! A scenario is either run headless with [`Scenario::run`] or inserted into
//! Bevy as a `Resource` and stepped by the viewer.

use bevy::prelude::Resource;
use log::{debug, info};

use crate::configuration::config::{AgentConfig, GalaxyConfig, ModeConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::analysis::{ComparisonReport, GalaxyReport};
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceField;
use crate::simulation::galaxy::Galaxy;
use crate::simulation::noise::SeededNoise;
use crate::simulation::orbit::{run_agent, run_inert};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Agent, NVec2};

/// What a scenario simulates
#[derive(Debug, Clone)]
pub enum Simulation {
    /// Conscious agent and an inert body launched from the same state
    Orbit { agent: Agent, x0: NVec2, v0: NVec2 },
    Galaxy(Galaxy),
}

/// Result of [`Scenario::run`]
#[derive(Debug, Clone)]
pub enum Outcome {
    Orbit(ComparisonReport),
    Galaxy(GalaxyReport),
}

/// Bevy resource representing a fully-initialized scenario
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub field: ForceField,
    pub noise: SeededNoise,
    pub simulation: Simulation,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            seed: p_cfg.seed,
            temperature: p_cfg.temperature,
        };
        parameters.validate()?;

        let engine = Engine::from(cfg.engine);
        let field = cfg.field.map(ForceField::from).unwrap_or_default();

        // Noise: seeded when asked, otherwise a fresh seed that is logged
        let mut noise = match parameters.seed {
            Some(seed) => SeededNoise::new(seed),
            None => SeededNoise::from_random_seed(),
        };
        info!("scenario seed: {}", noise.seed());

        let simulation = match engine.mode {
            ModeConfig::Orbit => build_orbit(cfg.agent)?,
            ModeConfig::Galaxy => build_galaxy(
                field,
                &parameters,
                cfg.galaxy.unwrap_or_default(),
                cfg.agent,
                &mut noise,
            )?,
        };

        Ok(Self {
            engine,
            parameters,
            field,
            noise,
            simulation,
        })
    }

    /// Run the simulation headless until it finishes or stops early
    pub fn run(&mut self) -> Result<Outcome> {
        let Parameters { dt, steps, temperature, .. } = self.parameters;

        match &mut self.simulation {
            Simulation::Orbit { agent, x0, v0 } => {
                let conscious = run_agent(agent, steps, dt, temperature, &mut self.noise)?.to_vec();
                let inert = run_inert(*x0, *v0, steps, dt, &mut self.noise)?;
                Ok(Outcome::Orbit(ComparisonReport::new(conscious, inert)))
            }
            Simulation::Galaxy(galaxy) => {
                let report = galaxy.simulate(steps, dt, &mut self.noise)?;
                Ok(Outcome::Galaxy(report))
            }
        }
    }
}

fn build_orbit(cfg: Option<AgentConfig>) -> Result<Simulation> {
    let agent = match cfg {
        Some(a) => Agent::new(
            a.x.into(),
            a.v.into(),
            a.horizon.unwrap_or(Agent::DEFAULT_HORIZON),
            a.strength.unwrap_or(Agent::DEFAULT_STRENGTH),
        )?,
        None => Agent::default(),
    };

    Ok(Simulation::Orbit {
        x0: agent.body.x,
        v0: agent.body.v,
        agent,
    })
}

fn build_galaxy(
    field: ForceField,
    parameters: &Parameters,
    g_cfg: GalaxyConfig,
    agent: Option<AgentConfig>,
    noise: &mut SeededNoise,
) -> Result<Simulation> {
    let mut galaxy = Galaxy::with_field(field, g_cfg.radius, g_cfg.particle_count, g_cfg.central_mass, noise)?;
    galaxy.set_temperature(parameters.temperature)?;

    if let Some(a) = agent {
        if a.horizon.is_some() || a.strength.is_some() {
            debug!("agent horizon/strength are fixed inside a galaxy; config values ignored");
        }
        galaxy.add_agent(a.x.into(), a.v.into(), a.goal.map(NVec2::from))?;
    }

    Ok(Simulation::Galaxy(galaxy))
}

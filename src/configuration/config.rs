//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – what to run (orbit comparison or galaxy) and how to show it
//! - [`ParametersConfig`] – step size, step budget, noise temperature and seed
//! - [`FieldConfig`]      – optional force-field constants
//! - [`AgentConfig`]      – optional conscious agent
//! - [`GalaxyConfig`]     – optional galaxy layout
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example galaxy scenario matching these types:
//!
//! ```yaml
//! engine:
//!   mode: "galaxy"          # or "orbit"
//!   viewer: false           # live bevy window (galaxy only)
//!   plot: true              # write a PNG under images/
//!
//! parameters:
//!   dt: 0.1                 # fixed step size
//!   steps: 1500             # step budget
//!   seed: 42                # omit for a fresh random seed
//!   temperature: 0.1        # decision noise std
//!
//! field:
//!   G: 1.0
//!   mass: 1000.0
//!   a0: 0.2
//!
//! agent:
//!   x: [ 25.0, 0.0 ]
//!   v: [  0.0, 3.0 ]
//!   goal: [ 0.0, 120.0 ]    # optional, defaults to 1.5 galaxy radii out
//!
//! galaxy:
//!   radius: 80.0
//!   particle_count: 30
//!   central_mass: 1000.0
//! ```
//!
//! `Scenario::build_scenario` maps this configuration into the runtime types
//! and validates it.

use serde::Deserialize;

use crate::simulation::forces::{ForceField, A_0, CENTRAL_MASS, G};
use crate::simulation::galaxy::{DEFAULT_GALAXY_RADIUS, DEFAULT_PARTICLE_COUNT};
use crate::simulation::policy::DEFAULT_TEMPERATURE;

/// Which simulation the engine runs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConfig {
    #[serde(rename = "orbit")] // standalone agent vs inert matter
    Orbit,

    #[serde(rename = "galaxy")] // agent navigating a galaxy of inert particles
    Galaxy,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub mode: ModeConfig,
    #[serde(default)]
    pub viewer: bool, // open the live 2D viewer instead of running headless
    #[serde(default)]
    pub plot: bool, // save trajectory images after the run
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,    // time step size
    pub steps: usize, // step budget
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
    #[serde(default = "default_temperature")]
    pub temperature: f64, // std of the decision noise
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

/// Force-field constants, all optional
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct FieldConfig {
    #[serde(default = "default_g")]
    pub G: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_a0")]
    pub a0: f64,
}

fn default_g() -> f64 {
    G
}

fn default_mass() -> f64 {
    CENTRAL_MASS
}

fn default_a0() -> f64 {
    A_0
}

impl From<FieldConfig> for ForceField {
    fn from(cfg: FieldConfig) -> Self {
        ForceField {
            G: cfg.G,
            mass: cfg.mass,
            a0: cfg.a0,
        }
    }
}

/// Initial state of the conscious agent
///
/// `horizon` and `strength` only apply to orbit mode; a galaxy fixes its own.
#[derive(Deserialize, Debug, Clone)]
pub struct AgentConfig {
    pub x: [f64; 2],
    pub v: [f64; 2],
    pub horizon: Option<u32>,
    pub strength: Option<f64>,
    pub goal: Option<[f64; 2]>, // galaxy mode only
}

#[derive(Deserialize, Debug, Clone)]
pub struct GalaxyConfig {
    #[serde(default = "default_galaxy_radius")]
    pub radius: f64,
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    #[serde(default = "default_mass")]
    pub central_mass: f64,
}

fn default_galaxy_radius() -> f64 {
    DEFAULT_GALAXY_RADIUS
}

fn default_particle_count() -> usize {
    DEFAULT_PARTICLE_COUNT
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GALAXY_RADIUS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            central_mass: CENTRAL_MASS,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub field: Option<FieldConfig>,
    pub agent: Option<AgentConfig>,
    pub galaxy: Option<GalaxyConfig>,
}

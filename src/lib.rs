pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{Body, Agent, InertParticle, BodyKind, NVec2, Trajectory};
pub use simulation::noise::{NoiseSource, SeededNoise, NoNoise};
pub use simulation::entropy::{density, predict_density};
pub use simulation::forces::{Regime, RadialForce, ForceField, NewtonianGravity, VerlindeGravity, radial_acceleration, stable_orbit_speed};
pub use simulation::policy::decide;
pub use simulation::integrator::{euler_step, semi_implicit_euler};
pub use simulation::orbit::{run_agent, run_inert, compare, circular_orbit};
pub use simulation::galaxy::Galaxy;
pub use simulation::analysis::{ComparisonReport, GalaxyReport, AgentReport};
pub use simulation::scenario::{Scenario, Simulation, Outcome};

pub use configuration::config::{EngineConfig, ParametersConfig, FieldConfig, AgentConfig, GalaxyConfig, ScenarioConfig, ModeConfig};

pub use visualization::{plot::{save_comparison, save_galaxy}, viewer::run_2d};

pub use benchmark::benchmark::{bench_galaxy_advance, bench_orbit};

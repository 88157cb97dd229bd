pub mod states;
pub mod params;
pub mod engine;
pub mod noise;
pub mod entropy;
pub mod forces;
pub mod policy;
pub mod integrator;
pub mod orbit;
pub mod galaxy;
pub mod analysis;
pub mod scenario;

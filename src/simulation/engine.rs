//! High-level runtime engine settings
//!
//! Selects the simulation mode and the post-run outputs used when building
//! and running a `Scenario`

use crate::configuration::config::{EngineConfig, ModeConfig};

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: ModeConfig, // orbit comparison or galaxy
    pub viewer: bool, // live bevy window
    pub plot: bool, // PNG output after the run
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            mode: cfg.mode,
            viewer: cfg.viewer,
            plot: cfg.plot,
        }
    }
}

//! Post-run summaries. Nothing here feeds back into the simulation.

use super::states::{NVec2, Trajectory};

/// Conscious agent vs inert matter launched from the same state
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub conscious: Trajectory,
    pub inert: Trajectory,
}

impl ComparisonReport {
    pub fn new(conscious: Trajectory, inert: Trajectory) -> Self {
        Self { conscious, inert }
    }

    pub fn conscious_final_distance(&self) -> f64 {
        final_distance(&self.conscious)
    }

    pub fn inert_final_distance(&self) -> f64 {
        final_distance(&self.inert)
    }

    /// True when the agent finished farther from the origin than the inert body
    pub fn agent_outran_inert(&self) -> bool {
        self.conscious_final_distance() > self.inert_final_distance()
    }
}

#[derive(Debug, Clone)]
pub struct AgentReport {
    pub trajectory: Trajectory,
    pub final_position: NVec2,
    pub final_distance: f64,
}

/// Outcome of [`Galaxy::simulate`](super::galaxy::Galaxy::simulate)
#[derive(Debug, Clone)]
pub struct GalaxyReport {
    pub galaxy_radius: f64,
    pub particle_count: usize,
    pub particle_trajectories: Vec<Trajectory>,
    pub agent: Option<AgentReport>,
    pub goal: Option<NVec2>,
    pub steps: usize, // steps actually executed
    pub escaped: bool,
    pub reached_goal: bool,
}

impl GalaxyReport {
    /// The agent either escaped or reached its goal
    pub fn navigated(&self) -> bool {
        self.escaped || self.reached_goal
    }
}

fn final_distance(traj: &[NVec2]) -> f64 {
    traj.last().map_or(0.0, |x| x.norm())
}

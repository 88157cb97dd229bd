//! Numerical parameters for a simulation run
//!
//! `Parameters` holds runtime settings:
//! - integration step size and step budget,
//! - policy temperature (std of the decision noise),
//! - optional random seed

use crate::error::{Result, SimError};
use super::policy::DEFAULT_TEMPERATURE;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub steps: usize, // step budget, runs may stop earlier
    pub seed: Option<u64>, // None -> fresh random seed
    pub temperature: f64, // decision noise std
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 0.1,
            steps: 1000,
            seed: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        validate_dt(self.dt)?;
        if !(self.temperature >= 0.0 && self.temperature.is_finite()) {
            return Err(SimError::InvalidParameter(format!(
                "temperature must be a finite non-negative number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Reject zero, negative and non-finite step sizes
pub fn validate_dt(dt: f64) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidParameter(format!("dt must be positive and finite, got {dt}")))
    }
}

//! Inference settings for the factor-graph calculator

use crate::error::{RatingError, Result};
use crate::factor_graph::DEFAULT_MAX_LOOP_ITERATIONS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Largest marginal change at which the team-difference loop stops
    pub convergence_threshold: f64,
    /// Hard cap on team-difference loop iterations
    pub max_loop_iterations: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            convergence_threshold: 1e-4,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.convergence_threshold > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Convergence threshold must be positive".to_string(),
            }
            .into());
        }

        if self.max_loop_iterations == 0 {
            return Err(RatingError::ConfigurationError {
                message: "Max loop iterations must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

//! Game parameters shared by every calculator

use crate::error::{RatingError, Result};
use crate::trueskill::draw_margin::draw_margin_from_draw_probability;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

const DEFAULT_INITIAL_MEAN: f64 = 25.0;
const DEFAULT_BETA: f64 = DEFAULT_INITIAL_MEAN / 6.0;
const DEFAULT_DRAW_PROBABILITY: f64 = 0.10;
const DEFAULT_DYNAMICS_FACTOR: f64 = DEFAULT_INITIAL_MEAN / 300.0;
const DEFAULT_INITIAL_STANDARD_DEVIATION: f64 = DEFAULT_INITIAL_MEAN / 3.0;

/// Parameters of the skill model for one kind of game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    /// Mean skill of a new player
    pub initial_mean: f64,
    /// Skill uncertainty of a new player
    pub initial_standard_deviation: f64,
    /// Standard deviation of a single performance around the player's skill
    pub beta: f64,
    /// Skill drift re-injected before every match (τ)
    pub dynamics_factor: f64,
    /// Probability that two evenly matched players draw
    pub draw_probability: f64,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            initial_mean: DEFAULT_INITIAL_MEAN,
            initial_standard_deviation: DEFAULT_INITIAL_STANDARD_DEVIATION,
            beta: DEFAULT_BETA,
            dynamics_factor: DEFAULT_DYNAMICS_FACTOR,
            draw_probability: DEFAULT_DRAW_PROBABILITY,
        }
    }
}

impl GameInfo {
    pub fn new(
        initial_mean: f64,
        initial_standard_deviation: f64,
        beta: f64,
        dynamics_factor: f64,
        draw_probability: f64,
    ) -> Self {
        Self {
            initial_mean,
            initial_standard_deviation,
            beta,
            dynamics_factor,
            draw_probability,
        }
    }

    /// Rating handed to a player who has never played
    pub fn default_rating(&self) -> Rating {
        Rating::new(self.initial_mean, self.initial_standard_deviation)
    }

    /// Draw margin ε implied by `draw_probability` and `beta`
    pub fn draw_margin(&self) -> f64 {
        draw_margin_from_draw_probability(self.draw_probability, self.beta)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.initial_mean.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Initial mean must be finite".to_string(),
            }
            .into());
        }

        if !(self.initial_standard_deviation > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Initial standard deviation must be positive".to_string(),
            }
            .into());
        }

        if !(self.beta > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if !(self.dynamics_factor >= 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Dynamics factor must be non-negative".to_string(),
            }
            .into());
        }

        if !(0.0..1.0).contains(&self.draw_probability) {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Draw probability must be in [0, 1), got {}",
                    self.draw_probability
                ),
            }
            .into());
        }

        Ok(())
    }
}

//! TrueSkill Graph - Bayesian skill ratings by Gaussian message passing
//!
//! This crate provides a generic factor graph (variables, messages,
//! factors, schedules), the TrueSkill factors and layers built on it, and
//! calculators that turn ranked match results into posterior ratings.

pub mod config;
pub mod error;
pub mod factor_graph;
pub mod numerics;
pub mod rating;
pub mod trueskill;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::{EngineSettings, GameInfo};
pub use numerics::GaussianBelief;
pub use rating::{RatingCalculationResult, SkillCalculator, SkillCalculatorOption};
pub use trueskill::{
    FactorGraphTrueSkillCalculator, TwoPlayerTrueSkillCalculator, TwoTeamTrueSkillCalculator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Calculator contract and the input handling shared by every calculator
//!
//! This module defines the `SkillCalculator` trait, team/player count
//! validation, rank sorting and partial-play weighting.

pub mod calculator;
pub mod partial_play;
pub mod rank_sorter;
pub mod validation;

// Re-export commonly used types
pub use calculator::{RatingCalculationResult, SkillCalculator, SkillCalculatorOption};
pub use partial_play::{partial_play_weight, warn_clamped_partial_play, MINIMUM_PARTIAL_PLAY};
pub use rank_sorter::sort_by_rank;
pub use validation::{validate_teams, CountRange};

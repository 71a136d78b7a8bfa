//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Team count {count} outside allowed range [{min}, {max}]")]
    TeamCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("Team {team} has {count} players, allowed range is [{min}, {max}]")]
    PlayerCountOutOfRange {
        team: usize,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Player appears more than once: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Message index {index} out of range for {factor} ({count} messages)")]
    InvalidMessageIndex {
        factor: String,
        index: usize,
        count: usize,
    },

    #[error("Invalid factor graph state: {message}")]
    InvalidGraphState { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

//! Configuration management for the rating engine
//!
//! This module handles game parameters, inference settings, and the
//! application configuration loaded from environment variables or TOML.

pub mod app;
pub mod engine;
pub mod game;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use engine::EngineSettings;
pub use game::GameInfo;

//! Main application configuration
//!
//! This module defines the configuration consumed by the `trueskill` binary,
//! including environment variable loading, TOML files and validation.

use super::{EngineSettings, GameInfo};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub game: GameInfo,
    pub engine: EngineSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "trueskill".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("TRUESKILL_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("TRUESKILL_LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Game settings
        if let Ok(mean) = env::var("TRUESKILL_INITIAL_MEAN") {
            self.game.initial_mean = mean
                .parse()
                .map_err(|_| anyhow!("Invalid TRUESKILL_INITIAL_MEAN value: {}", mean))?;
        }
        if let Ok(sigma) = env::var("TRUESKILL_INITIAL_STANDARD_DEVIATION") {
            self.game.initial_standard_deviation = sigma.parse().map_err(|_| {
                anyhow!("Invalid TRUESKILL_INITIAL_STANDARD_DEVIATION value: {}", sigma)
            })?;
        }
        if let Ok(beta) = env::var("TRUESKILL_BETA") {
            self.game.beta = beta
                .parse()
                .map_err(|_| anyhow!("Invalid TRUESKILL_BETA value: {}", beta))?;
        }
        if let Ok(tau) = env::var("TRUESKILL_DYNAMICS_FACTOR") {
            self.game.dynamics_factor = tau
                .parse()
                .map_err(|_| anyhow!("Invalid TRUESKILL_DYNAMICS_FACTOR value: {}", tau))?;
        }
        if let Ok(draw) = env::var("TRUESKILL_DRAW_PROBABILITY") {
            self.game.draw_probability = draw
                .parse()
                .map_err(|_| anyhow!("Invalid TRUESKILL_DRAW_PROBABILITY value: {}", draw))?;
        }

        // Engine settings
        if let Ok(threshold) = env::var("TRUESKILL_CONVERGENCE_THRESHOLD") {
            self.engine.convergence_threshold = threshold.parse().map_err(|_| {
                anyhow!("Invalid TRUESKILL_CONVERGENCE_THRESHOLD value: {}", threshold)
            })?;
        }
        if let Ok(iterations) = env::var("TRUESKILL_MAX_LOOP_ITERATIONS") {
            self.engine.max_loop_iterations = iterations.parse().map_err(|_| {
                anyhow!("Invalid TRUESKILL_MAX_LOOP_ITERATIONS value: {}", iterations)
            })?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.game.validate()?;
    config.engine.validate()?;

    Ok(())
}

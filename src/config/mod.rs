//! Configuration management for the engine
//!
//! This module handles loading, validation, and defaults for all engine
//! configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use std::path::Path;

use tracing::{debug, info};

use crate::utils::error::{EngineError, Result};

/// Top-level configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Engine configuration
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        let engine: EngineConfig = serde_yaml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { engine };
        config.engine.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load defaults with environment variable overrides applied
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let engine = EngineConfig::from_env()?;
        let config = Self { engine };

        config.engine.validate()?;
        Ok(config)
    }
}

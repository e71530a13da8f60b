//! Environment variable overrides
//!
//! Variables use the `PULSE_` prefix, e.g. `PULSE_TOTAL_USERS=12000`.

use std::env;

use tracing::debug;

use super::models::EngineConfig;
use crate::utils::error::{EngineError, Result};

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| EngineError::Config(format!("Invalid {}: {}", name, e)))
}

impl EngineConfig {
    /// Start from defaults and apply environment overrides
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        // Placeholder figures
        if let Ok(total) = env::var("PULSE_TOTAL_USERS") {
            config.placeholders.total_users = parse_var("PULSE_TOTAL_USERS", &total)?;
        }
        if let Ok(hours) = env::var("PULSE_SESSION_HOURS_PER_ACTIVE_USER") {
            config.placeholders.session_hours_per_active_user =
                parse_var("PULSE_SESSION_HOURS_PER_ACTIVE_USER", &hours)?;
        }

        // Licence capacities
        if let Ok(connect) = env::var("PULSE_CONNECT_LICENCES") {
            config.capacity.connect_licences = parse_var("PULSE_CONNECT_LICENCES", &connect)?;
        }
        if let Ok(workbench) = env::var("PULSE_WORKBENCH_LICENCES") {
            config.capacity.workbench_licences = parse_var("PULSE_WORKBENCH_LICENCES", &workbench)?;
        }

        // Window parameters
        if let Ok(days) = env::var("PULSE_ACTIVE_WITHIN_DAYS") {
            config.windows.active_within_days = parse_var("PULSE_ACTIVE_WITHIN_DAYS", &days)?;
        }
        if let Ok(days) = env::var("PULSE_DORMANT_AFTER_DAYS") {
            config.windows.dormant_after_days = parse_var("PULSE_DORMANT_AFTER_DAYS", &days)?;
        }
        if let Ok(days) = env::var("PULSE_FREQUENCY_WINDOW_DAYS") {
            config.windows.frequency_window_days =
                Some(parse_var("PULSE_FREQUENCY_WINDOW_DAYS", &days)?);
        }

        // Cache settings
        if let Ok(enabled) = env::var("PULSE_CACHE_ENABLED") {
            config.cache.enabled = parse_var("PULSE_CACHE_ENABLED", &enabled)?;
        }
        if let Ok(max) = env::var("PULSE_CACHE_MAX_SNAPSHOTS") {
            config.cache.max_snapshots = parse_var("PULSE_CACHE_MAX_SNAPSHOTS", &max)?;
        }

        // Logging
        if let Ok(level) = env::var("PULSE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("PULSE_LOG_JSON") {
            config.logging.json = parse_var("PULSE_LOG_JSON", &json)?;
        }

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }
}

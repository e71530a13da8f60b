//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use tracing::debug;

use super::models::*;
use crate::utils::error::{EngineError, Result};

/// Validation behaviour for configuration structures
pub trait Validate {
    /// Check semantic constraints, returning the first violation
    fn validate(&self) -> Result<()>;
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.placeholders.validate()?;
        self.capacity.validate()?;
        self.windows.validate()?;
        self.cache.validate()?;
        debug!("Engine configuration validated");
        Ok(())
    }
}

impl Validate for PlaceholderConfig {
    fn validate(&self) -> Result<()> {
        if self.session_hours_per_active_user < 0.0 {
            return Err(EngineError::Validation(
                "session_hours_per_active_user must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for CapacityConfig {
    fn validate(&self) -> Result<()> {
        if self.connect_licences == 0 {
            return Err(EngineError::Validation(
                "connect_licences must be greater than zero".to_string(),
            ));
        }
        if self.workbench_licences == 0 {
            return Err(EngineError::Validation(
                "workbench_licences must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for WindowConfig {
    fn validate(&self) -> Result<()> {
        if self.active_within_days == 0 {
            return Err(EngineError::Validation(
                "active_within_days must be at least one day".to_string(),
            ));
        }
        if self.dormant_after_days <= self.active_within_days {
            return Err(EngineError::Validation(format!(
                "dormant_after_days ({}) must exceed active_within_days ({})",
                self.dormant_after_days, self.active_within_days
            )));
        }
        if self.frequency_window_days == Some(0) {
            return Err(EngineError::Validation(
                "frequency_window_days must be at least one day when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<()> {
        if self.max_snapshots == 0 {
            return Err(EngineError::Validation(
                "max_snapshots must be at least one".to_string(),
            ));
        }
        Ok(())
    }
}

//! Configuration models with serde defaults

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Labeled placeholder figures standing in for real computations
    pub placeholders: PlaceholderConfig,
    /// Global licence capacities
    pub capacity: CapacityConfig,
    /// Status and categorization window parameters
    pub windows: WindowConfig,
    /// Snapshot memo cache
    pub cache: CacheConfig,
    /// Logging behaviour
    pub logging: LoggingConfig,
}

/// Static figures injected at load, not derived from the datasets
///
/// Each one stands behind the same interface as a real computation so it
/// can be swapped for a genuine derivation without changing call sites.
/// None of them is ever folded silently into a computed aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// Total registered users across the platform
    #[serde(default = "default_total_users")]
    pub total_users: u64,
    /// Session hours attributed to each daily active user
    #[serde(default = "default_session_hours")]
    pub session_hours_per_active_user: f64,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            total_users: default_total_users(),
            session_hours_per_active_user: default_session_hours(),
        }
    }
}

/// Global licence capacities, never derived from the licence dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Connect licences available platform-wide
    #[serde(default = "default_connect_licences")]
    pub connect_licences: u64,
    /// Workbench licences available platform-wide
    #[serde(default = "default_workbench_licences")]
    pub workbench_licences: u64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            connect_licences: default_connect_licences(),
            workbench_licences: default_workbench_licences(),
        }
    }
}

/// Window parameters for status derivation and frequency tiers
///
/// The frequency window and the upstream engagement window are distinct,
/// independently owned parameters; only the frequency window is an engine
/// knob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Days since last login within which a user counts as Active
    #[serde(default = "default_active_within")]
    pub active_within_days: u32,
    /// Upper bound in days for Inactive; beyond this a user is Dormant
    #[serde(default = "default_dormant_after")]
    pub dormant_after_days: u32,
    /// Fixed window for frequency tiers; `None` uses the filter window
    /// length
    #[serde(default)]
    pub frequency_window_days: Option<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            active_within_days: default_active_within(),
            dormant_after_days: default_dormant_after(),
            frequency_window_days: None,
        }
    }
}

/// Snapshot memo cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable snapshot memoization
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Maximum number of cached snapshots
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_snapshots: default_max_snapshots(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON-formatted events instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_total_users() -> u64 {
    10_500
}

fn default_session_hours() -> f64 {
    8.5
}

fn default_connect_licences() -> u64 {
    10_000
}

fn default_workbench_licences() -> u64 {
    5_000
}

fn default_active_within() -> u32 {
    7
}

fn default_dormant_after() -> u32 {
    60
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_snapshots() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

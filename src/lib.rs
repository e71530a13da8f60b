//! # Pulsemetrics-RS
//!
//! A Rust implementation of the metrics layer behind a multi-tenant
//! engagement dashboard: the pure computation engine that turns raw
//! per-user/per-day activity records into filtered, deduplicated,
//! period-compared, and categorized figures.
//!
//! ## Features
//!
//! - **Single attribution**: duplicate user rows collapse to one
//!   (tenancy, component) pair before any counting, so totals agree
//!   across every view
//! - **Composable filtering**: tenancy, environment, component, and
//!   inclusive date-range predicates over an immutable value object
//! - **Period comparison**: each window is compared against the
//!   immediately preceding window of identical length
//! - **Categorization**: login-frequency tiers, engagement tiers, and
//!   activity statuses that partition the population exactly
//! - **Memoized recomputation**: snapshots cached by
//!   (dataset version, filter state) with last-write-wins publication
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use pulsemetrics_rs::{
//!     Config, DatasetStore, FilterState, MetricsEngine, RawDatasets, Selection,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(DatasetStore::ingest(RawDatasets::default()));
//!     let engine = MetricsEngine::new(store, config.engine);
//!
//!     let state = FilterState::new(
//!         Selection::One("Nebula".to_string()),
//!         Selection::All,
//!         Selection::All,
//!         NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
//!         NaiveDate::from_ymd_opt(2024, 1, 30).ok_or("bad date")?,
//!     )?;
//!
//!     let overview = engine.compute_overview(&state);
//!     println!("active users: {}", overview.active_users);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{EngineError, Result};

// Export the engine surface
pub use core::analytics::{
    DashboardSnapshot, DateWindow, LicenceView, MetricsEngine, OverviewView, PeriodDelta,
    SortDirection, TenancyView, UsersView,
};

// Export the domain records and filter state
pub use core::models::{
    Component, Environment, FilterState, LicenceRecord, Selection, TenancyMetric,
    TimeSeriesPoint, UserRecord, UserStatus,
};

// Export the record store
pub use storage::{DatasetStore, IngestReport, RawDatasets};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

//! Metrics aggregation and filtering engine
//!
//! Turns raw per-user/per-day activity records into the filtered,
//! deduplicated, period-compared, and categorized figures the dashboard
//! displays. Control flow runs record store → identity resolver → filter
//! engine → {period comparator, categorization, aggregation, ranking} →
//! views; every stage is a pure function of its inputs.

pub mod aggregate;
pub mod categorize;
pub mod engine;
pub mod filters;
pub mod periods;
pub mod ranking;
pub mod resolver;
pub mod views;


// Re-export the types most consumers need
pub use aggregate::{
    ComponentTotals, LicenceUsage, TenancyActivity, WeeklyPoint, utilization_pct,
};
pub use categorize::{EngagementTier, FrequencyTier, TierDistribution};
pub use engine::{DashboardSnapshot, MetricsEngine};
pub use periods::{DateWindow, PeriodDelta, percent_change, round_display};
pub use ranking::SortDirection;
pub use views::{
    LicenceColumn, LicenceDeltas, LicenceView, OverviewDeltas, OverviewView, SessionMetrics,
    TenancyColumn, TenancyRow, TenancySummary, TenancyView, UserColumn, UserRow, UsersDeltas,
    UsersView,
};

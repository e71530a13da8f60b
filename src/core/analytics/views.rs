//! View models consumed by the presentation layer
//!
//! Plain data carriers plus the column-sort helpers for the three
//! sortable tables. All figures are produced by the engine; nothing here
//! reaches back into the datasets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::WindowConfig;
use crate::core::models::{Component, Environment, UserRecord, UserStatus};

use super::aggregate::{ComponentTotals, LicenceUsage, WeeklyPoint, utilization_pct};
use super::categorize::{self, FrequencyTier, TierDistribution};
use super::periods::PeriodDelta;
use super::ranking::{SortDirection, sorted_by_key};

/// Overview tab figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    /// Total registered users; a labeled placeholder constant, not derived
    pub total_users: u64,
    /// Working-set size for the current window
    pub active_users: u64,
    /// Users first seen inside the current window
    pub new_users: u64,
    /// Derived session hours summed over the window
    pub session_hours: f64,
    /// Weekly rollup of the filtered series
    pub weekly_series: Vec<WeeklyPoint>,
    /// Top five tenancies by active users
    pub top_tenancies: Vec<TenancySummary>,
    /// Period-over-period deltas for the stat cards
    pub deltas: OverviewDeltas,
}

/// Pre-aggregated tenancy summary enriched with derived session hours
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenancySummary {
    /// Tenancy name
    pub tenancy: String,
    /// Active users attributed to the tenancy
    pub active_users: u64,
    /// Derived session hours for the tenancy
    pub session_hours: f64,
}

/// Deltas for the overview stat cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewDeltas {
    /// Static placeholder total, so the change is pinned to 0%
    pub total_users: PeriodDelta,
    /// Active users vs the comparison window
    pub active_users: PeriodDelta,
    /// New users vs the comparison window
    pub new_users: PeriodDelta,
    /// Session hours vs the comparison window
    pub session_hours: PeriodDelta,
}

/// Licences tab figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenceView {
    /// Connect licences assigned within the current selections
    pub assigned_connect: u64,
    /// Working-set users on Connect
    pub active_connect: u64,
    /// Workbench licences assigned within the current selections
    pub assigned_workbench: u64,
    /// Working-set users on Workbench
    pub active_workbench: u64,
    /// Connect capacity the assigned figure is reported against
    pub connect_capacity: u64,
    /// Workbench capacity the assigned figure is reported against
    pub workbench_capacity: u64,
    /// Period-over-period deltas for the stat cards
    pub deltas: LicenceDeltas,
    /// Per-(tenancy, component) usage rows
    pub table: Vec<LicenceUsage>,
    /// Per-component totals appended under the table
    pub totals: Vec<ComponentTotals>,
}

impl LicenceView {
    /// Connect utilization at full precision
    pub fn connect_utilization_pct(&self) -> f64 {
        utilization_pct(self.assigned_connect, self.connect_capacity)
    }

    /// Workbench utilization at full precision
    pub fn workbench_utilization_pct(&self) -> f64 {
        utilization_pct(self.assigned_workbench, self.workbench_capacity)
    }
}

/// Deltas for the licence stat cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LicenceDeltas {
    /// Active Connect users vs the comparison window
    pub active_connect: PeriodDelta,
    /// Active Workbench users vs the comparison window
    pub active_workbench: PeriodDelta,
}

/// One row of the users table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRow {
    /// Stable user identifier
    pub user_id: String,
    /// Owning tenancy
    pub tenancy: String,
    /// Component the record is attributed to
    pub component: Component,
    /// Environment the logins were observed in
    pub environment: Environment,
    /// Most recent login date
    pub last_login: NaiveDate,
    /// Total logins attributed to this record
    pub login_count: u32,
    /// Derived status relative to the dataset reference date
    pub status: UserStatus,
    /// Login-frequency tier over the categorization window
    pub frequency: FrequencyTier,
}

/// Users tab figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsersView {
    /// Latest in-window daily (power tier) user count
    pub daily_count: u64,
    /// Latest in-window weekly (regular tier) user count
    pub weekly_count: u64,
    /// Working-set size for the current window
    pub active_count: u64,
    /// Placeholder total minus active, saturating at zero
    pub dormant_count: u64,
    /// Engagement tier distribution for the latest in-window day
    pub distribution: TierDistribution,
    /// Session estimates for the pills under the cards
    pub session: SessionMetrics,
    /// Period-over-period deltas for the stat cards
    pub deltas: UsersDeltas,
    /// Working set sorted by last login descending, first 100 rows
    pub table: Vec<UserRow>,
}

/// Deltas for the users stat cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsersDeltas {
    /// Active users vs the comparison window
    pub active: PeriodDelta,
    /// Dormant users vs the comparison window
    pub dormant: PeriodDelta,
    /// Daily (power tier) count vs the comparison window
    pub daily: PeriodDelta,
    /// Weekly (regular tier) count vs the comparison window
    pub weekly: PeriodDelta,
}

/// Session estimates for the users tab
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionMetrics {
    /// Average session length in hours
    pub avg_length_hours: f64,
    /// Mean daily active users, reported as sessions per user
    pub sessions_per_user: f64,
    /// Session length vs the comparison window
    pub length_delta: PeriodDelta,
    /// Sessions per user vs the comparison window
    pub sessions_delta: PeriodDelta,
}

/// One row of the tenancies table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenancyRow {
    /// Tenancy name
    pub tenancy: String,
    /// Users attributed to the tenancy in the resolved set
    pub total_users: u64,
    /// Users in the current working set
    pub active_users: u64,
    /// Connect licences assigned
    pub assigned_connect: u64,
    /// Working-set users on Connect
    pub active_connect: u64,
    /// Workbench licences assigned
    pub assigned_workbench: u64,
    /// Working-set users on Workbench
    pub active_workbench: u64,
}

/// Tenancies tab figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenancyView {
    /// Per-tenancy totals and licence figures, sorted by tenancy name
    pub table: Vec<TenancyRow>,
}

/// Sortable columns of the users table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserColumn {
    /// User identifier
    UserId,
    /// Tenancy name
    Tenancy,
    /// Component
    Component,
    /// Environment
    Environment,
    /// Last login date
    LastLogin,
    /// Login count
    LoginCount,
    /// Derived status
    Status,
}

/// Sortable columns of the licence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LicenceColumn {
    /// Tenancy name
    Tenancy,
    /// Component
    Component,
    /// Assigned licences
    Assigned,
    /// Active licences
    Active,
}

/// Sortable columns of the tenancies table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TenancyColumn {
    /// Tenancy name
    Tenancy,
    /// Total users
    TotalUsers,
    /// Active users
    ActiveUsers,
    /// Assigned Connect licences
    AssignedConnect,
    /// Active Connect users
    ActiveConnect,
    /// Assigned Workbench licences
    AssignedWorkbench,
    /// Active Workbench users
    ActiveWorkbench,
}

/// Build table rows from working-set records
///
/// Status derives against the dataset reference date; the frequency tier
/// uses the categorization window handed in by the engine.
pub fn user_rows(
    records: &[UserRecord],
    reference: NaiveDate,
    frequency_window_days: i64,
    windows: &WindowConfig,
) -> Vec<UserRow> {
    records
        .iter()
        .map(|record| UserRow {
            user_id: record.user_id.clone(),
            tenancy: record.tenancy.clone(),
            component: record.component,
            environment: record.environment,
            last_login: record.last_login,
            login_count: record.login_count,
            status: categorize::user_status(record.last_login, reference, windows),
            frequency: categorize::frequency_tier(record.login_count, frequency_window_days),
        })
        .collect()
}

/// Stable column sort over user rows
pub fn sort_user_rows(rows: &[UserRow], column: UserColumn, direction: SortDirection) -> Vec<UserRow> {
    match column {
        UserColumn::UserId => sorted_by_key(rows, direction, |r| r.user_id.clone()),
        UserColumn::Tenancy => sorted_by_key(rows, direction, |r| r.tenancy.clone()),
        UserColumn::Component => sorted_by_key(rows, direction, |r| r.component),
        UserColumn::Environment => sorted_by_key(rows, direction, |r| r.environment),
        UserColumn::LastLogin => sorted_by_key(rows, direction, |r| r.last_login),
        UserColumn::LoginCount => sorted_by_key(rows, direction, |r| r.login_count),
        UserColumn::Status => sorted_by_key(rows, direction, |r| r.status),
    }
}

/// Stable column sort over licence rows
pub fn sort_licence_rows(
    rows: &[LicenceUsage],
    column: LicenceColumn,
    direction: SortDirection,
) -> Vec<LicenceUsage> {
    match column {
        LicenceColumn::Tenancy => sorted_by_key(rows, direction, |r| r.tenancy.clone()),
        LicenceColumn::Component => sorted_by_key(rows, direction, |r| r.component),
        LicenceColumn::Assigned => sorted_by_key(rows, direction, |r| r.assigned),
        LicenceColumn::Active => sorted_by_key(rows, direction, |r| r.active),
    }
}

/// Stable column sort over tenancy rows
pub fn sort_tenancy_rows(
    rows: &[TenancyRow],
    column: TenancyColumn,
    direction: SortDirection,
) -> Vec<TenancyRow> {
    match column {
        TenancyColumn::Tenancy => sorted_by_key(rows, direction, |r| r.tenancy.clone()),
        TenancyColumn::TotalUsers => sorted_by_key(rows, direction, |r| r.total_users),
        TenancyColumn::ActiveUsers => sorted_by_key(rows, direction, |r| r.active_users),
        TenancyColumn::AssignedConnect => sorted_by_key(rows, direction, |r| r.assigned_connect),
        TenancyColumn::ActiveConnect => sorted_by_key(rows, direction, |r| r.active_connect),
        TenancyColumn::AssignedWorkbench => sorted_by_key(rows, direction, |r| r.assigned_workbench),
        TenancyColumn::ActiveWorkbench => sorted_by_key(rows, direction, |r| r.active_workbench),
    }
}

/// Format a delta as an arrowed percentage with one decimal
pub fn format_change(delta: &PeriodDelta) -> String {
    let pct = delta.display_pct();
    let arrow = if pct >= 0.0 { '▲' } else { '▼' };
    format!("{} {:.1}%", arrow, pct)
}

/// Break fractional hours into days/hours/minutes/seconds
pub fn format_duration_hours(hours: f64) -> String {
    let total_seconds = (hours * 3600.0).max(0.0) as u64;
    let days = total_seconds / 86_400;
    let rem = total_seconds % 86_400;
    let hrs = rem / 3_600;
    let rem = rem % 3_600;
    let mins = rem / 60;
    let secs = rem % 60;
    format!("{}d {}h {}m {}s", days, hrs, mins, secs)
}

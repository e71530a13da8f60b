//! Weekly resampling and per-tenancy / per-licence rollups
//!
//! Instantaneous metrics (active users) roll up as means; event metrics
//! (logins, new users, session hours) roll up as sums. Ranking is applied
//! by the caller strictly after aggregation, never before.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::models::{Component, LicenceRecord, TimeSeriesPoint, UserRecord};

/// One calendar week of rolled-up time-series metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    /// Monday of the calendar week
    pub week_start: NaiveDate,
    /// Mean daily active users across the week
    pub active_users: f64,
    /// Total logins across the week
    pub logins: u64,
    /// Total new users across the week
    pub new_users: u64,
    /// Total derived session hours across the week
    pub session_hours: f64,
}

/// Roll daily points up into calendar weeks starting Monday
pub fn weekly_rollup(points: &[TimeSeriesPoint], hours_per_active_user: f64) -> Vec<WeeklyPoint> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&TimeSeriesPoint>> = BTreeMap::new();
    for point in points {
        let monday = point.date.week(Weekday::Mon).first_day();
        weeks.entry(monday).or_default().push(point);
    }

    weeks
        .into_iter()
        .map(|(week_start, days)| {
            let count = days.len() as f64;
            WeeklyPoint {
                week_start,
                active_users: days.iter().map(|d| d.active_users as f64).sum::<f64>() / count,
                logins: days.iter().map(|d| d.logins).sum(),
                new_users: days.iter().map(|d| d.new_users).sum(),
                session_hours: days
                    .iter()
                    .map(|d| d.session_hours(hours_per_active_user))
                    .sum(),
            }
        })
        .collect()
}

/// Per-tenancy activity rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenancyActivity {
    /// Tenancy name
    pub tenancy: String,
    /// Users attributed to the tenancy in the resolved set
    pub total_users: u64,
    /// Users in the current working set
    pub active_users: u64,
    /// Working-set users on Connect
    pub connect_active: u64,
    /// Working-set users on Workbench
    pub workbench_active: u64,
    /// Logins summed over the working set
    pub total_logins: u64,
}

/// Group the resolved and working sets by tenancy
///
/// Both inputs are post-resolution, so each user is counted under exactly
/// one tenancy and summing `active_users` across the result equals the
/// working-set size. Rows come back sorted by tenancy name.
pub fn tenancy_rollup(resolved: &[UserRecord], working: &[UserRecord]) -> Vec<TenancyActivity> {
    let mut rows: BTreeMap<&str, TenancyActivity> = BTreeMap::new();

    for record in resolved {
        let entry = rows
            .entry(record.tenancy.as_str())
            .or_insert_with(|| blank_activity(&record.tenancy));
        entry.total_users += 1;
    }

    for record in working {
        let entry = rows
            .entry(record.tenancy.as_str())
            .or_insert_with(|| blank_activity(&record.tenancy));
        entry.active_users += 1;
        entry.total_logins += u64::from(record.login_count);
        match record.component {
            Component::Connect => entry.connect_active += 1,
            Component::Workbench => entry.workbench_active += 1,
        }
    }

    rows.into_values().collect()
}

fn blank_activity(tenancy: &str) -> TenancyActivity {
    TenancyActivity {
        tenancy: tenancy.to_string(),
        total_users: 0,
        active_users: 0,
        connect_active: 0,
        workbench_active: 0,
        total_logins: 0,
    }
}

/// Per-(tenancy, component) licence usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenceUsage {
    /// Tenancy name
    pub tenancy: String,
    /// Component the licences belong to
    pub component: Component,
    /// Licences assigned, summed from the licence dataset
    pub assigned: u64,
    /// Distinct working-set users holding the pair
    pub active: u64,
}

/// Group licences by (tenancy, component), joining working-set activity
///
/// Licence rows drive the table; pairs active in the working set but
/// absent from the licence dataset do not produce rows. Output is sorted
/// by (tenancy, component).
pub fn licence_rollup(licences: &[LicenceRecord], working: &[UserRecord]) -> Vec<LicenceUsage> {
    let mut assigned: BTreeMap<(&str, Component), u64> = BTreeMap::new();
    for licence in licences {
        *assigned
            .entry((licence.tenancy.as_str(), licence.component))
            .or_default() += licence.licences_used;
    }

    let mut active: HashMap<(&str, Component), u64> = HashMap::new();
    for user in working {
        *active
            .entry((user.tenancy.as_str(), user.component))
            .or_default() += 1;
    }

    assigned
        .into_iter()
        .map(|((tenancy, component), assigned)| LicenceUsage {
            tenancy: tenancy.to_string(),
            component,
            assigned,
            active: active.get(&(tenancy, component)).copied().unwrap_or(0),
        })
        .collect()
}

/// Totals per component across licence usage rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTotals {
    /// Component the totals describe
    pub component: Component,
    /// Assigned licences summed across tenancies
    pub assigned: u64,
    /// Active licences summed across tenancies
    pub active: u64,
}

/// Sum licence usage rows per component
pub fn component_totals(rows: &[LicenceUsage]) -> Vec<ComponentTotals> {
    let mut totals: BTreeMap<Component, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = totals.entry(row.component).or_default();
        entry.0 += row.assigned;
        entry.1 += row.active;
    }
    totals
        .into_iter()
        .map(|(component, (assigned, active))| ComponentTotals {
            component,
            assigned,
            active,
        })
        .collect()
}

/// Utilization percentage of assigned licences against a fixed capacity
///
/// Zero capacity yields 0.0. The stored integer sums are never mutated;
/// rounding of the derived figure happens at display time.
pub fn utilization_pct(assigned: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        assigned as f64 / capacity as f64 * 100.0
    }
}

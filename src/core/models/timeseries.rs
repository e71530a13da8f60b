//! Daily platform activity series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of platform-wide activity
///
/// The four engagement tier counts are disjoint and sum to the total user
/// population for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Day the figures describe
    pub date: NaiveDate,
    /// Distinct users active on the day
    pub active_users: u64,
    /// Logins recorded on the day
    pub logins: u64,
    /// Users first seen on the day
    pub new_users: u64,
    /// Power tier count (40+ logins over the trailing window)
    pub power_users: u64,
    /// Regular tier count (8-39 logins)
    pub regular_users: u64,
    /// Light tier count (1-7 logins)
    pub light_users: u64,
    /// Dormant tier count (no logins)
    pub dormant_users: u64,
}

impl TimeSeriesPoint {
    /// Derived session hours for the day
    ///
    /// The per-user factor is a labeled placeholder from configuration
    /// until real session data lands.
    pub fn session_hours(&self, hours_per_active_user: f64) -> f64 {
        self.active_users as f64 * hours_per_active_user
    }

    /// Sum of the four engagement tier counts
    pub fn tier_total(&self) -> u64 {
        self.power_users + self.regular_users + self.light_users + self.dormant_users
    }
}

//! Login-frequency tiers, engagement tiers, and activity status
//!
//! Two separate classification schemes: frequency tiers answer "how often
//! does this user log in over the filtered window", engagement tiers
//! bucket the platform population by trailing-window login counts. The
//! windows behind them are distinct parameters and are never reconciled
//! into one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::core::models::{TimeSeriesPoint, UserRecord, UserStatus};

/// Login-frequency tier over the active filtered window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FrequencyTier {
    /// Average gap of 1.5 days or less between logins
    Daily,
    /// Average gap above 1.5 and up to 7 days
    Weekly,
    /// Average gap above 7 days
    Occasional,
    /// No logins in the window
    Dormant,
}

impl fmt::Display for FrequencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyTier::Daily => write!(f, "Daily"),
            FrequencyTier::Weekly => write!(f, "Weekly"),
            FrequencyTier::Occasional => write!(f, "Occasional"),
            FrequencyTier::Dormant => write!(f, "Dormant"),
        }
    }
}

/// Engagement tier by trailing-window login count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EngagementTier {
    /// 40 or more logins
    Power,
    /// 8 to 39 logins
    Regular,
    /// 1 to 7 logins
    Light,
    /// No logins
    Dormant,
}

impl fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementTier::Power => write!(f, "Power"),
            EngagementTier::Regular => write!(f, "Regular"),
            EngagementTier::Light => write!(f, "Light"),
            EngagementTier::Dormant => write!(f, "Dormant"),
        }
    }
}

/// Classify a user by average days between logins
///
/// `average = window_days / login_count`. Zero logins cannot go through
/// the ratio and classify as Dormant directly.
pub fn frequency_tier(login_count: u32, window_days: i64) -> FrequencyTier {
    if login_count == 0 {
        return FrequencyTier::Dormant;
    }
    let average = window_days as f64 / f64::from(login_count);
    if average <= 1.5 {
        FrequencyTier::Daily
    } else if average <= 7.0 {
        FrequencyTier::Weekly
    } else {
        FrequencyTier::Occasional
    }
}

/// Classify a user by trailing-window login count
///
/// The thresholds are non-overlapping, so each user lands in exactly one
/// tier. The trailing window itself (60 days) is owned by the upstream
/// exporter that produces the counts.
pub fn engagement_tier(login_count: u32) -> EngagementTier {
    match login_count {
        0 => EngagementTier::Dormant,
        1..=7 => EngagementTier::Light,
        8..=39 => EngagementTier::Regular,
        _ => EngagementTier::Power,
    }
}

/// Derive a user's activity status relative to the dataset reference date
///
/// Active within `active_within_days` of the reference date, Inactive up
/// to and including `dormant_after_days`, Dormant beyond. Relative to the
/// dataset's reference date, not the filter window.
pub fn user_status(last_login: NaiveDate, reference: NaiveDate, windows: &WindowConfig) -> UserStatus {
    let days = (reference - last_login).num_days();
    if days <= i64::from(windows.active_within_days) {
        UserStatus::Active
    } else if days <= i64::from(windows.dormant_after_days) {
        UserStatus::Inactive
    } else {
        UserStatus::Dormant
    }
}

/// Counts per engagement tier for a day or cohort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDistribution {
    /// Power tier count
    pub power: u64,
    /// Regular tier count
    pub regular: u64,
    /// Light tier count
    pub light: u64,
    /// Dormant tier count
    pub dormant: u64,
}

impl TierDistribution {
    /// Distribution reported by a time-series point
    pub fn from_point(point: &TimeSeriesPoint) -> Self {
        Self {
            power: point.power_users,
            regular: point.regular_users,
            light: point.light_users,
            dormant: point.dormant_users,
        }
    }

    /// Distribution derived by classifying a cohort of users
    ///
    /// Fallback source when the filtered window holds no time-series rows.
    pub fn from_users(users: &[UserRecord]) -> Self {
        let mut distribution = Self::default();
        for user in users {
            match engagement_tier(user.login_count) {
                EngagementTier::Power => distribution.power += 1,
                EngagementTier::Regular => distribution.regular += 1,
                EngagementTier::Light => distribution.light += 1,
                EngagementTier::Dormant => distribution.dormant += 1,
            }
        }
        distribution
    }

    /// Total population across the four tiers
    pub fn total(&self) -> u64 {
        self.power + self.regular + self.light + self.dormant
    }

    /// Percentage share of one segment, zero for an empty population
    pub fn share_pct(&self, segment: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            segment as f64 / total as f64 * 100.0
        }
    }
}

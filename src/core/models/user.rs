//! Per-user activity records

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product component a record is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Component {
    /// The Connect client
    Connect,
    /// The Workbench client
    Workbench,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Connect => write!(f, "Connect"),
            Component::Workbench => write!(f, "Workbench"),
        }
    }
}

/// Deployment environment the logins were observed in
///
/// Upstream exports are inconsistent about naming, so the serde aliases
/// accept the variants seen in the wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Production, also exported as "Live"
    #[serde(alias = "Live", alias = "Production/Live")]
    Production,
    /// Development
    Development,
    /// Staging, also exported as "Pre-production"
    #[serde(alias = "Pre-production", alias = "Staging/Pre-production")]
    Staging,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Development => write!(f, "Development"),
            Environment::Staging => write!(f, "Staging"),
        }
    }
}

/// Activity status derived from the last login relative to the dataset
/// reference date
///
/// The three statuses partition the resolved user set: exactly one status
/// per user, no gaps, no overlap. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// Last login within the active window (default 7 days)
    Active,
    /// Last login between the active window and the dormancy bound
    Inactive,
    /// Last login beyond the dormancy bound (default 60 days)
    Dormant,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
            UserStatus::Dormant => write!(f, "Dormant"),
        }
    }
}

/// A single per-user activity record
///
/// Raw exports may list the same user under several (tenancy, component)
/// pairs; identity resolution collapses them before any counting. Incoming
/// rows may also carry a pre-computed `status` column, which is ignored:
/// status is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
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
}

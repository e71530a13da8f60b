//! Licence assignment records

use serde::{Deserialize, Serialize};

use super::user::Component;

/// Licences assigned to one (tenancy, component) pair
///
/// The dataset carries no environment or date columns; global capacities
/// are configuration constants, never derived from these rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceRecord {
    /// Tenancy name
    pub tenancy: String,
    /// Component the licences belong to
    pub component: Component,
    /// Number of licences assigned
    pub licences_used: u64,
}

//! Pre-aggregated per-tenancy summary rows

use serde::{Deserialize, Serialize};

/// One summary row per tenancy, as exported upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenancyMetric {
    /// Tenancy name
    pub tenancy: String,
    /// Active users attributed to the tenancy
    pub active_users: u64,
    /// Total logins attributed to the tenancy
    pub total_logins: u64,
    /// Users on the Workbench component
    pub workbench_users: u64,
    /// Users on the Connect component
    pub connect_users: u64,
    /// Period-over-period growth percentage supplied by the exporter
    pub growth: f64,
}

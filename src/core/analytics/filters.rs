//! Filter engine
//!
//! Pure predicates over the resolved set and the other datasets. Each
//! dimension predicate is an equality test with an all-values bypass; the
//! date predicate is inclusive on both ends; predicates compose with
//! logical AND.

use crate::core::models::{FilterState, LicenceRecord, TimeSeriesPoint, UserRecord};

use super::periods::DateWindow;

/// Whether a user record passes every predicate of the filter state
pub fn matches_user(record: &UserRecord, state: &FilterState) -> bool {
    matches_dimensions(record, state) && DateWindow::of(state).contains(record.last_login)
}

/// Dimension predicates only: tenancy, environment, component
///
/// New-user counting and distribution fallbacks need the population that
/// passes the dimension filters regardless of the date window.
pub fn matches_dimensions(record: &UserRecord, state: &FilterState) -> bool {
    state.tenancy().admits(&record.tenancy)
        && state.environment().admits(&record.environment)
        && state.component().admits(&record.component)
}

/// Apply the full filter state to the resolved set
///
/// Idempotent: filtering an already-filtered set with the same state
/// returns the same records. An empty result is valid output, not an
/// error.
pub fn apply(resolved: &[UserRecord], state: &FilterState) -> Vec<UserRecord> {
    resolved
        .iter()
        .filter(|record| matches_user(record, state))
        .cloned()
        .collect()
}

/// Apply the dimension predicates against an arbitrary date window
///
/// Used for the comparison period: same dimension predicates, different
/// date bounds.
pub fn apply_in_window(
    resolved: &[UserRecord],
    state: &FilterState,
    window: DateWindow,
) -> Vec<UserRecord> {
    resolved
        .iter()
        .filter(|record| matches_dimensions(record, state) && window.contains(record.last_login))
        .cloned()
        .collect()
}

/// Users passing the dimension predicates, ignoring the date window
pub fn apply_dimensions(resolved: &[UserRecord], state: &FilterState) -> Vec<UserRecord> {
    resolved
        .iter()
        .filter(|record| matches_dimensions(record, state))
        .cloned()
        .collect()
}

/// Time-series rows falling inside a window
pub fn timeseries_in_window(points: &[TimeSeriesPoint], window: DateWindow) -> Vec<TimeSeriesPoint> {
    points
        .iter()
        .filter(|point| window.contains(point.date))
        .cloned()
        .collect()
}

/// Licence rows passing the tenancy and component selections
///
/// The licence dataset carries no environment or date columns, so only
/// these two predicates apply.
pub fn apply_licences(licences: &[LicenceRecord], state: &FilterState) -> Vec<LicenceRecord> {
    licences
        .iter()
        .filter(|licence| {
            state.tenancy().admits(&licence.tenancy) && state.component().admits(&licence.component)
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match over user ids
///
/// Backs the user table's search box. `None` and blank queries admit every
/// row.
pub fn search_user_ids(records: &[UserRecord], query: Option<&str>) -> Vec<UserRecord> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let needle = q.to_lowercase();
            records
                .iter()
                .filter(|record| record.user_id.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => records.to_vec(),
    }
}

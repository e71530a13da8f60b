//! Identity resolution
//!
//! Collapses raw user rows so each user contributes to exactly one
//! (tenancy, component) pair before any counting happens.

use std::collections::HashMap;

use tracing::debug;

use crate::core::models::UserRecord;

/// Resolve duplicate user ids down to a single attributed record
///
/// The record with the strictly latest `last_login` wins. When two records
/// tie on `last_login`, the one seen first in input order is kept; ties
/// must resolve deterministically or downstream totals stop being
/// reproducible. Survivors keep their first-seen relative order. The input
/// is never mutated; an empty input yields an empty resolved set.
pub fn resolve(users: &[UserRecord]) -> Vec<UserRecord> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(users.len());
    let mut resolved: Vec<UserRecord> = Vec::with_capacity(users.len());

    for record in users {
        match index.get(record.user_id.as_str()) {
            Some(&slot) => {
                if record.last_login > resolved[slot].last_login {
                    resolved[slot] = record.clone();
                }
            }
            None => {
                index.insert(record.user_id.as_str(), resolved.len());
                resolved.push(record.clone());
            }
        }
    }

    debug!(
        raw = users.len(),
        resolved = resolved.len(),
        "resolved user identities"
    );
    resolved
}

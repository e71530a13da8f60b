//! Raw dataset fixtures and engine builders
//!
//! One mid-sized scenario shared by the integration tests: three
//! tenancies, both components, all environments, a duplicated user id
//! resolved by latest login, and a handful of deliberately malformed rows
//! that ingestion must skip and count.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};

use pulsemetrics_rs::config::EngineConfig;
use pulsemetrics_rs::{DatasetStore, FilterState, MetricsEngine, RawDatasets, Selection};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Every time-series fixture row carries the same figures, so aggregate
/// expectations stay easy to state in the tests.
pub const DAILY_ACTIVE: u64 = 240;
pub const DAILY_LOGINS: u64 = 720;
pub const TIER_POPULATION: u64 = 500;

fn user_rows() -> Vec<Value> {
    vec![
        json!({
            "userId": "u-1001",
            "tenancy": "Nebula",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "2024-03-30",
            "loginCount": 44,
            "status": "Active"
        }),
        json!({
            "userId": "u-1002",
            "tenancy": "Nebula",
            "component": "Connect",
            "environment": "Development",
            "lastLogin": "2024-03-29",
            "loginCount": 20,
            "status": "Active"
        }),
        json!({
            "userId": "u-1003",
            "tenancy": "Nebula",
            "component": "Workbench",
            "environment": "Production",
            "lastLogin": "2024-03-15",
            "loginCount": 8,
            "status": "Inactive"
        }),
        json!({
            "userId": "u-1004",
            "tenancy": "Phoenix",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "2024-03-28",
            "loginCount": 31,
            "status": "Active"
        }),
        json!({
            "userId": "u-1005",
            "tenancy": "Phoenix",
            "component": "Workbench",
            "environment": "Pre-production",
            "lastLogin": "2024-03-02",
            "loginCount": 3,
            "status": "Inactive"
        }),
        json!({
            "userId": "u-1006",
            "tenancy": "Meridian",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "2024-02-20",
            "loginCount": 5,
            "status": "Inactive"
        }),
        // u-1007 appears twice; the Phoenix/Workbench row is newer and
        // must survive resolution
        json!({
            "userId": "u-1007",
            "tenancy": "Nebula",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "2024-01-10",
            "loginCount": 14,
            "status": "Dormant"
        }),
        json!({
            "userId": "u-1007",
            "tenancy": "Phoenix",
            "component": "Workbench",
            "environment": "Production",
            "lastLogin": "2024-01-12",
            "loginCount": 9,
            "status": "Dormant"
        }),
        json!({
            "userId": "u-1008",
            "tenancy": "Meridian",
            "component": "Workbench",
            "environment": "Production",
            "lastLogin": "2023-12-15",
            "loginCount": 0,
            "status": "Dormant"
        }),
        // "Live" is an accepted alias for Production
        json!({
            "userId": "u-1009",
            "tenancy": "Phoenix",
            "component": "Connect",
            "environment": "Live",
            "lastLogin": "2024-03-31",
            "loginCount": 52,
            "status": "Active"
        }),
        // Malformed rows: unparsable date, negative count, unknown component
        json!({
            "userId": "u-bad1",
            "tenancy": "Nebula",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "not-a-date",
            "loginCount": 4
        }),
        json!({
            "userId": "u-bad2",
            "tenancy": "Nebula",
            "component": "Connect",
            "environment": "Production",
            "lastLogin": "2024-03-10",
            "loginCount": -3
        }),
        json!({
            "userId": "u-bad3",
            "tenancy": "Nebula",
            "component": "Desktop",
            "environment": "Production",
            "lastLogin": "2024-03-10",
            "loginCount": 4
        }),
    ]
}

fn tenancy_rows() -> Vec<Value> {
    vec![
        json!({
            "tenancy": "Nebula",
            "activeUsers": 320,
            "totalLogins": 2100,
            "workbenchUsers": 140,
            "connectUsers": 180,
            "growth": 5.2
        }),
        json!({
            "tenancy": "Phoenix",
            "activeUsers": 410,
            "totalLogins": 3500,
            "workbenchUsers": 210,
            "connectUsers": 200,
            "growth": 2.4
        }),
        json!({
            "tenancy": "Meridian",
            "activeUsers": 150,
            "totalLogins": 900,
            "workbenchUsers": 60,
            "connectUsers": 90,
            "growth": -0.8
        }),
    ]
}

fn licence_rows() -> Vec<Value> {
    vec![
        json!({"tenancy": "Nebula", "component": "Connect", "licencesUsed": 180}),
        json!({"tenancy": "Nebula", "component": "Workbench", "licencesUsed": 60}),
        json!({"tenancy": "Phoenix", "component": "Connect", "licencesUsed": 150}),
        json!({"tenancy": "Phoenix", "component": "Workbench", "licencesUsed": 120}),
        json!({"tenancy": "Meridian", "component": "Connect", "licencesUsed": 40}),
        json!({"tenancy": "Meridian", "component": "Workbench", "licencesUsed": 25}),
        // Malformed: licencesUsed is not a number
        json!({"tenancy": "Meridian", "component": "Connect", "licencesUsed": "many"}),
    ]
}

fn timeseries_rows() -> Vec<Value> {
    let mut rows = Vec::new();
    let mut date = day(2024, 2, 15);
    let end = day(2024, 3, 31);
    while date <= end {
        rows.push(json!({
            "date": date.format("%Y-%m-%d").to_string(),
            "activeUsers": DAILY_ACTIVE,
            "logins": DAILY_LOGINS,
            "newUsers": 3,
            "powerUsers": 45,
            "regularUsers": 130,
            "lightUsers": 210,
            "dormantUsers": 115
        }));
        date = date + Duration::days(1);
    }
    // Malformed: unparsable date
    rows.push(json!({
        "date": "garbage",
        "activeUsers": DAILY_ACTIVE,
        "logins": DAILY_LOGINS,
        "newUsers": 3,
        "powerUsers": 45,
        "regularUsers": 130,
        "lightUsers": 210,
        "dormantUsers": 115
    }));
    rows
}

pub fn raw_datasets() -> RawDatasets {
    RawDatasets {
        users: user_rows(),
        tenancies: tenancy_rows(),
        licences: licence_rows(),
        timeseries: timeseries_rows(),
    }
}

pub fn store() -> DatasetStore {
    DatasetStore::ingest(raw_datasets())
}

pub fn engine() -> MetricsEngine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> MetricsEngine {
    MetricsEngine::new(Arc::new(store()), config)
}

pub fn window(start: NaiveDate, end: NaiveDate) -> FilterState {
    FilterState::for_window(start, end).unwrap()
}

/// The whole of March 2024, the month the fixture data centres on
pub fn march() -> FilterState {
    window(day(2024, 3, 1), day(2024, 3, 31))
}

pub fn tenancy(name: &str) -> Selection<String> {
    Selection::One(name.to_string())
}

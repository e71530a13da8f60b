//! Immutable typed views over the four raw datasets

use chrono::{Duration, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::core::models::{
    Component, Environment, LicenceRecord, TenancyMetric, TimeSeriesPoint, UserRecord,
};

/// Raw dataset rows handed over by the loading layer
///
/// Loading and schema ownership live outside the engine; rows arrive as
/// decoded JSON objects, one per record.
#[derive(Debug, Clone, Default)]
pub struct RawDatasets {
    /// Raw user rows
    pub users: Vec<Value>,
    /// Raw tenancy summary rows
    pub tenancies: Vec<Value>,
    /// Raw licence rows
    pub licences: Vec<Value>,
    /// Raw time-series rows
    pub timeseries: Vec<Value>,
}

/// Rows skipped during ingestion, per dataset
///
/// A malformed row is never fatal: it is dropped, logged, and counted
/// here so the condition surfaces as a figure rather than a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// User rows that failed schema or type expectations
    pub users_skipped: u64,
    /// Tenancy rows that failed schema or type expectations
    pub tenancies_skipped: u64,
    /// Licence rows that failed schema or type expectations
    pub licences_skipped: u64,
    /// Time-series rows that failed schema or type expectations
    pub timeseries_skipped: u64,
}

impl IngestReport {
    /// Total rows skipped across all four datasets
    pub fn total_skipped(&self) -> u64 {
        self.users_skipped
            + self.tenancies_skipped
            + self.licences_skipped
            + self.timeseries_skipped
    }
}

/// Immutable typed views over the loaded datasets
///
/// Nothing mutates the store after construction; downstream components
/// receive shared slices only.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    users: Vec<UserRecord>,
    tenancies: Vec<TenancyMetric>,
    licences: Vec<LicenceRecord>,
    timeseries: Vec<TimeSeriesPoint>,
    report: IngestReport,
    reference_date: Option<NaiveDate>,
    version: u64,
}

impl DatasetStore {
    /// Ingest raw rows, skipping and counting malformed records
    pub fn ingest(raw: RawDatasets) -> Self {
        Self::ingest_version(raw, 1)
    }

    /// Ingest with an explicit dataset version for memo keys
    pub fn ingest_version(raw: RawDatasets, version: u64) -> Self {
        let mut report = IngestReport::default();
        let users: Vec<UserRecord> = parse_rows(raw.users, "users", &mut report.users_skipped);
        let tenancies: Vec<TenancyMetric> =
            parse_rows(raw.tenancies, "tenancies", &mut report.tenancies_skipped);
        let licences: Vec<LicenceRecord> =
            parse_rows(raw.licences, "licences", &mut report.licences_skipped);
        let timeseries: Vec<TimeSeriesPoint> =
            parse_rows(raw.timeseries, "timeseries", &mut report.timeseries_skipped);

        let reference_date = timeseries
            .iter()
            .map(|point| point.date)
            .max()
            .or_else(|| users.iter().map(|user| user.last_login).max());

        info!(
            users = users.len(),
            tenancies = tenancies.len(),
            licences = licences.len(),
            timeseries = timeseries.len(),
            skipped = report.total_skipped(),
            "datasets ingested"
        );

        Self {
            users,
            tenancies,
            licences,
            timeseries,
            report,
            reference_date,
            version,
        }
    }

    /// Typed constructor for callers that already hold parsed records
    pub fn from_records(
        users: Vec<UserRecord>,
        tenancies: Vec<TenancyMetric>,
        licences: Vec<LicenceRecord>,
        timeseries: Vec<TimeSeriesPoint>,
    ) -> Self {
        let reference_date = timeseries
            .iter()
            .map(|point| point.date)
            .max()
            .or_else(|| users.iter().map(|user| user.last_login).max());
        Self {
            users,
            tenancies,
            licences,
            timeseries,
            report: IngestReport::default(),
            reference_date,
            version: 1,
        }
    }

    /// Raw user rows, pre-resolution
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Pre-aggregated tenancy summary rows
    pub fn tenancies(&self) -> &[TenancyMetric] {
        &self.tenancies
    }

    /// Licence assignment rows
    pub fn licences(&self) -> &[LicenceRecord] {
        &self.licences
    }

    /// Daily platform activity series
    pub fn timeseries(&self) -> &[TimeSeriesPoint] {
        &self.timeseries
    }

    /// Rows skipped during ingestion
    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Dataset version used in memo keys
    pub fn version(&self) -> u64 {
        self.version
    }

    /// "Now" for status derivation: the latest time-series date, falling
    /// back to the latest login
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    /// Default filter window: the last 30 days ending at the reference
    /// date
    pub fn default_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.reference_date
            .map(|end| (end - Duration::days(29), end))
    }

    /// Sorted distinct tenancy names observed in the user dataset
    pub fn tenancy_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self.users.iter().map(|user| user.tenancy.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Environment choices: the base list merged with observed values
    pub fn environment_options(&self) -> Vec<Environment> {
        let mut options = vec![
            Environment::Production,
            Environment::Development,
            Environment::Staging,
        ];
        for user in &self.users {
            if !options.contains(&user.environment) {
                options.push(user.environment);
            }
        }
        options
    }

    /// Component choices observed across the user and licence datasets
    pub fn component_options(&self) -> Vec<Component> {
        let mut options: Vec<Component> = Vec::new();
        let observed = self
            .users
            .iter()
            .map(|user| user.component)
            .chain(self.licences.iter().map(|licence| licence.component));
        for component in observed {
            if !options.contains(&component) {
                options.push(component);
            }
        }
        options.sort();
        options
    }
}

fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>, dataset: &str, skipped: &mut u64) -> Vec<T> {
    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => parsed.push(record),
            Err(err) => {
                *skipped += 1;
                warn!(dataset, %err, "skipping malformed row");
            }
        }
    }
    parsed
}

//! Domain records for the engine
//!
//! One file per dataset, plus the immutable filter state. All records are
//! plain serde-deserializable values; nothing here performs computation.

pub mod filter;
pub mod licence;
pub mod tenancy;
pub mod timeseries;
pub mod user;

pub use filter::{FilterState, Selection};
pub use licence::LicenceRecord;
pub use tenancy::TenancyMetric;
pub use timeseries::TimeSeriesPoint;
pub use user::{Component, Environment, UserRecord, UserStatus};

//! In-memory record store
//!
//! Datasets are ingested once at process start and are read-only for the
//! remainder of the session; no locking is needed for reads.

pub mod memory;

pub use memory::{DatasetStore, IngestReport, RawDatasets};

//! Synthetic "big data" table: a random record generator and a small data access layer over one
//! fixed-schema SQLite table, plus the generate-or-refresh policy and the aggregate report built on
//! top of them.

pub mod record;
pub mod generator;
pub mod store;
pub mod report;
pub mod config;

pub use record::Record;
pub use generator::RecordGenerator;
pub use store::{BigDataStore, StoreError};
pub use report::{generate_or_refresh, Refresh, Report};

//! Sparkify ETL library
//!
//! Loads song metadata and user activity logs (newline-delimited JSON) into a
//! SQLite star schema. The library is shared by the `sparkify-etl` and
//! `create-tables` binaries and by the integration tests.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod records;
pub mod sqlite_persistence;
pub mod warehouse;

pub use error::{DecodeError, EtlError, EtlResult, StorageError};
pub use pipeline::{run, RunSummary};
pub use warehouse::{SqliteWarehouse, WarehouseStore};

//! Error kinds surfaced by the ETL run.
//!
//! Every failure is fatal for the run: decode errors abort a file before any
//! write, storage errors abort the file's transaction, and the dispatcher stops
//! at the first failing file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a data file into structured records.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at {path:?} line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected {expected} record(s) in {path:?}, found {found}")]
    RecordCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Errors raised by the storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open database {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database schema is not usable: {0}")]
    Schema(String),

    #[error("Write '{statement}' failed: {source}")]
    Write {
        statement: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query '{statement}' failed: {source}")]
    Read {
        statement: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Transaction control failed: {0}")]
    Transaction(#[source] rusqlite::Error),
}

impl StorageError {
    pub(crate) fn write(statement: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Write { statement, source }
    }

    pub(crate) fn read(statement: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Read { statement, source }
    }
}

#[derive(Debug, Error)]
pub enum EtlError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("Processing {path:?} failed: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<EtlError>,
    },
}

impl EtlError {
    pub(crate) fn in_file(self, path: PathBuf) -> Self {
        EtlError::File {
            path,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping the per-file wrapper.
    pub fn root_cause(&self) -> &EtlError {
        match self {
            EtlError::File { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type EtlResult<T> = Result<T, EtlError>;

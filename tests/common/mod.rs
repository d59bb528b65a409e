//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.

#![allow(dead_code, unused_imports)]

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::*;

use sparkify_etl::config::AppConfig;
use sparkify_etl::SqliteWarehouse;
use std::path::PathBuf;
use tempfile::TempDir;

/// A warehouse database and empty song/log data roots in a temporary directory.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: AppConfig,
    pub store: SqliteWarehouse,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("sparkifydb.sqlite"),
            song_data_root: dir.path().join("data/song_data"),
            log_data_root: dir.path().join("data/log_data"),
        };
        std::fs::create_dir_all(&config.song_data_root).unwrap();
        std::fs::create_dir_all(&config.log_data_root).unwrap();
        let store = SqliteWarehouse::create(&config.db_path, true).unwrap();
        TestEnv { dir, config, store }
    }

    pub fn song_root(&self) -> PathBuf {
        self.config.song_data_root.clone()
    }

    pub fn log_root(&self) -> PathBuf {
        self.config.log_data_root.clone()
    }

    /// Counts the rows of `SELECT COUNT(*) FROM <from>`.
    pub fn count(&self, from: &str) -> i64 {
        self.query_one(&format!("SELECT COUNT(*) FROM {}", from))
    }

    /// Runs a query expected to return a single value.
    pub fn query_one<T: rusqlite::types::FromSql>(&self, sql: &str) -> T {
        self.store
            .connection()
            .query_row(sql, [], |r| r.get(0))
            .unwrap()
    }
}

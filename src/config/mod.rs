mod file_config;

pub use file_config::FileConfig;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "sparkifydb.sqlite";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";

/// Values taken from the command line. Every field has a default, so a run
/// without flags is valid.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data_root: PathBuf,
    pub log_data_root: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present. Relative paths are
    /// resolved against `cwd`.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>, cwd: &Path) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        let song_data_root = file
            .song_data
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data.clone());
        let log_data_root = file
            .log_data
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data.clone());

        if song_data_root == log_data_root {
            anyhow::bail!(
                "Song and log data must live in different directories, both are {:?}",
                song_data_root
            );
        }

        Ok(Self {
            db_path: absolutize(db_path, cwd),
            song_data_root: absolutize(song_data_root, cwd),
            log_data_root: absolutize(log_data_root, cwd),
        })
    }
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

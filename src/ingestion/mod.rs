//! Ingestion of song-data and log-data files into the warehouse.
//!
//! Song files are loaded first: the log loader resolves each play against the
//! songs and artists already committed to the warehouse.

mod dispatcher;
mod log_file;
mod song_file;
mod time_dim;

pub use dispatcher::{
    find_data_files, process_data, FileProgress, ProcessSummary, DATA_FILE_EXTENSION,
};
pub use log_file::{load_log, LogFileLoader};
pub use song_file::{load_song, SongFileLoader};
pub use time_dim::{start_time_from_millis, time_row};

use crate::error::{DecodeError, EtlResult};
use crate::records::read_records;
use crate::warehouse::WarehouseStore;
use serde::de::DeserializeOwned;
use std::ops::AddAssign;
use std::path::Path;

/// Loads the decoded records of one data file into the warehouse.
pub trait RecordHandler {
    type Record: DeserializeOwned;

    /// Short name of the data kind, used in log lines.
    fn name(&self) -> &'static str;

    /// Decodes one data file. Defaults to any number of records per file.
    fn decode(&self, path: &Path) -> Result<Vec<Self::Record>, DecodeError> {
        read_records(path)
    }

    /// Writes the records of one file. Runs inside the file's transaction.
    fn load(&self, store: &dyn WarehouseStore, records: &[Self::Record]) -> EtlResult<LoadStats>;
}

/// Rows written (or skipped) while loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub artists: usize,
    pub songs: usize,
    pub time_rows: usize,
    pub users: usize,
    pub songplays: usize,
    /// Songplays whose song and artist could be resolved.
    pub matched_songplays: usize,
    /// Log events that were not song plays.
    pub skipped_events: usize,
    /// Song plays without a user id, for which no user row was written.
    pub skipped_users: usize,
}

impl AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.artists += other.artists;
        self.songs += other.songs;
        self.time_rows += other.time_rows;
        self.users += other.users;
        self.songplays += other.songplays;
        self.matched_songplays += other.matched_songplays;
        self.skipped_events += other.skipped_events;
        self.skipped_users += other.skipped_users;
    }
}

//! The two-pass run: song data first, then log data.

use crate::config::AppConfig;
use crate::error::EtlResult;
use crate::ingestion::{process_data, FileProgress, LogFileLoader, ProcessSummary, SongFileLoader};
use crate::warehouse::WarehouseStore;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub songs: ProcessSummary,
    pub logs: ProcessSummary,
}

/// Loads the song-data root, then the log-data root, into `store`.
///
/// The order matters: plays in the logs are resolved against songs and
/// artists that the first pass has already committed.
pub fn run(
    store: &dyn WarehouseStore,
    config: &AppConfig,
    on_progress: &mut dyn FnMut(FileProgress<'_>),
) -> EtlResult<RunSummary> {
    info!("Loading song data from {}", config.song_data_root.display());
    let songs = process_data(store, &config.song_data_root, &SongFileLoader, on_progress)?;
    info!(
        "Song data loaded: {} new artists, {} new songs",
        songs.stats.artists, songs.stats.songs
    );

    info!("Loading log data from {}", config.log_data_root.display());
    let logs = process_data(store, &config.log_data_root, &LogFileLoader, on_progress)?;
    info!(
        "Log data loaded: {} songplays ({} matched to a song), {} users, {} new time rows, {} non-play events skipped",
        logs.stats.songplays,
        logs.stats.matched_songplays,
        logs.stats.users,
        logs.stats.time_rows,
        logs.stats.skipped_events
    );

    Ok(RunSummary { songs, logs })
}

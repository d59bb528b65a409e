//! Song-data files: one song and its artist per file.

use super::{LoadStats, RecordHandler};
use crate::error::{DecodeError, EtlResult, StorageError};
use crate::records::{read_single_record, SongRecord};
use crate::warehouse::{Artist, Song, WarehouseStore};
use std::path::Path;

/// Writes the artist row and the song row described by one song record.
pub fn load_song(
    store: &dyn WarehouseStore,
    record: &SongRecord,
) -> Result<LoadStats, StorageError> {
    let artist = Artist {
        artist_id: record.artist_id.clone(),
        name: record.artist_name.clone(),
        location: record.artist_location.clone(),
        latitude: record.artist_latitude,
        longitude: record.artist_longitude,
    };
    let song = Song {
        song_id: record.song_id.clone(),
        title: record.title.clone(),
        artist_id: record.artist_id.clone(),
        year: record.year,
        duration: record.duration,
    };

    let mut stats = LoadStats::default();
    if store.insert_artist(&artist)? {
        stats.artists += 1;
    }
    if store.insert_song(&song)? {
        stats.songs += 1;
    }
    Ok(stats)
}

pub struct SongFileLoader;

impl RecordHandler for SongFileLoader {
    type Record = SongRecord;

    fn name(&self) -> &'static str {
        "song"
    }

    fn decode(&self, path: &Path) -> Result<Vec<SongRecord>, DecodeError> {
        read_single_record(path).map(|record| vec![record])
    }

    fn load(&self, store: &dyn WarehouseStore, records: &[SongRecord]) -> EtlResult<LoadStats> {
        let mut stats = LoadStats::default();
        for record in records {
            stats += load_song(store, record)?;
        }
        Ok(stats)
    }
}

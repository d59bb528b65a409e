//! WarehouseStore trait definition.
//!
//! The loaders only talk to storage through this trait: named, parameterized
//! writes for every table, the song lookup, and explicit transaction control
//! for the dispatcher.

use super::models::{Artist, Song, SongKey, SongMatch, Songplay, TableCounts, TimeRow, User};
use crate::error::StorageError;

pub trait WarehouseStore {
    // =========================================================================
    // Transaction Control
    // =========================================================================

    /// Opens the transaction that wraps one data file.
    fn begin(&self) -> Result<(), StorageError>;

    /// Makes every write since `begin` durable.
    fn commit(&self) -> Result<(), StorageError>;

    /// Discards every write since `begin`.
    fn rollback(&self) -> Result<(), StorageError>;

    // =========================================================================
    // Dimension Writes
    // =========================================================================

    /// Inserts an artist. An existing artist_id is left untouched.
    /// Returns true if a new row was written.
    fn insert_artist(&self, artist: &Artist) -> Result<bool, StorageError>;

    /// Inserts a song. An existing song_id is left untouched.
    /// Returns true if a new row was written.
    fn insert_song(&self, song: &Song) -> Result<bool, StorageError>;

    /// Inserts a time row. A start_time that is already stored is ignored.
    /// Returns true if a new row was written.
    fn insert_time(&self, time: &TimeRow) -> Result<bool, StorageError>;

    /// Inserts a user, or updates the level of an existing one.
    fn upsert_user(&self, user: &User) -> Result<(), StorageError>;

    // =========================================================================
    // Fact Writes and Lookups
    // =========================================================================

    /// Resolves a played song to its song and artist ids.
    /// Returns Ok(None) when nothing matches or the match is ambiguous.
    fn find_song(&self, key: &SongKey<'_>) -> Result<Option<SongMatch>, StorageError>;

    /// Appends a songplay and returns its generated id.
    fn insert_songplay(&self, songplay: &Songplay) -> Result<i64, StorageError>;

    /// Row counts for the end-of-run report.
    fn table_counts(&self) -> Result<TableCounts, StorageError>;
}

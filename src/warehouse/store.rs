//! SQLite-backed warehouse store.
//!
//! A single connection serves the whole run. Every statement is parameterized
//! and goes through the connection's prepared statement cache, since the log
//! loader runs the same handful of statements once per event.

use super::models::{Artist, Song, SongKey, SongMatch, Songplay, TableCounts, TimeRow, User};
use super::schema::{TABLE_NAMES, WAREHOUSE_SCHEMA};
use super::trait_def::WarehouseStore;
use crate::error::StorageError;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::{info, warn};

/// Durations closer than this (in seconds) are considered equal when
/// resolving a play event to a song.
pub const DURATION_TOLERANCE_SECS: f64 = 0.001;

const ARTIST_INSERT: &str = "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(artist_id) DO NOTHING";

const SONG_INSERT: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(song_id) DO NOTHING";

const TIME_INSERT: &str = "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT(start_time) DO NOTHING";

const USER_UPSERT: &str = "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(user_id) DO UPDATE SET level = excluded.level";

const SONG_SELECT: &str = "SELECT songs.song_id, artists.artist_id FROM songs \
     JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songs.title = ?1 AND artists.name = ?2 AND ABS(songs.duration - ?3) <= ?4 \
     LIMIT 2";

const SONGPLAY_INSERT: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Opens an existing warehouse database and checks its schema.
    ///
    /// The database file must already exist and hold the star schema, see the
    /// `create-tables` binary.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StorageError::Connection {
            path: db_path.to_path_buf(),
            source,
        })?;

        WAREHOUSE_SCHEMA
            .validate(&conn)
            .map_err(|e| StorageError::Schema(format!("{:#}", e)))?;

        info!("Opened warehouse database at {:?}", db_path);
        Ok(SqliteWarehouse { conn })
    }

    /// Creates the star schema in the given database file, creating the file
    /// if needed. With `drop_existing`, existing warehouse tables are dropped
    /// first.
    pub fn create<P: AsRef<Path>>(db_path: P, drop_existing: bool) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path).map_err(|source| StorageError::Connection {
            path: db_path.to_path_buf(),
            source,
        })?;
        Self::install_schema(&conn, drop_existing)?;
        info!("Created warehouse schema at {:?}", db_path);
        Ok(SqliteWarehouse { conn })
    }

    /// A throwaway warehouse with a fresh schema, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Connection {
            path: ":memory:".into(),
            source,
        })?;
        Self::install_schema(&conn, false)?;
        Ok(SqliteWarehouse { conn })
    }

    fn install_schema(conn: &Connection, drop_existing: bool) -> Result<(), StorageError> {
        if drop_existing {
            WAREHOUSE_SCHEMA
                .drop(conn)
                .map_err(|e| StorageError::Schema(format!("{:#}", e)))?;
        }
        WAREHOUSE_SCHEMA
            .create(conn)
            .map_err(|e| StorageError::Schema(format!("{:#}", e)))
    }

    /// Direct access to the connection, for reporting queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn execute<P: rusqlite::Params>(
        &self,
        statement: &'static str,
        params: P,
    ) -> Result<usize, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(statement)
            .map_err(StorageError::write(statement))?;
        stmt.execute(params).map_err(StorageError::write(statement))
    }
}

impl WarehouseStore for SqliteWarehouse {
    fn begin(&self) -> Result<(), StorageError> {
        self.conn
            .execute("BEGIN IMMEDIATE", [])
            .map_err(StorageError::Transaction)?;
        Ok(())
    }

    fn commit(&self) -> Result<(), StorageError> {
        self.conn
            .execute("COMMIT", [])
            .map_err(StorageError::Transaction)?;
        Ok(())
    }

    fn rollback(&self) -> Result<(), StorageError> {
        self.conn
            .execute("ROLLBACK", [])
            .map_err(StorageError::Transaction)?;
        Ok(())
    }

    fn insert_artist(&self, artist: &Artist) -> Result<bool, StorageError> {
        let changed = self.execute(
            ARTIST_INSERT,
            params![
                &artist.artist_id,
                &artist.name,
                &artist.location,
                artist.latitude,
                artist.longitude
            ],
        )?;
        Ok(changed > 0)
    }

    fn insert_song(&self, song: &Song) -> Result<bool, StorageError> {
        let changed = self.execute(
            SONG_INSERT,
            params![
                &song.song_id,
                &song.title,
                &song.artist_id,
                song.year,
                song.duration
            ],
        )?;
        Ok(changed > 0)
    }

    fn insert_time(&self, time: &TimeRow) -> Result<bool, StorageError> {
        let changed = self.execute(
            TIME_INSERT,
            params![
                time.start_time,
                time.hour,
                time.day,
                time.week,
                time.month,
                time.year,
                time.weekday
            ],
        )?;
        Ok(changed > 0)
    }

    fn upsert_user(&self, user: &User) -> Result<(), StorageError> {
        self.execute(
            USER_UPSERT,
            params![
                user.user_id,
                &user.first_name,
                &user.last_name,
                &user.gender,
                user.level.to_db_str()
            ],
        )?;
        Ok(())
    }

    fn find_song(&self, key: &SongKey<'_>) -> Result<Option<SongMatch>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(SONG_SELECT)
            .map_err(StorageError::read(SONG_SELECT))?;
        let mut matches = stmt
            .query_map(
                params![
                    key.title,
                    key.artist_name,
                    key.duration,
                    DURATION_TOLERANCE_SECS
                ],
                |row| {
                    Ok(SongMatch {
                        song_id: row.get(0)?,
                        artist_id: row.get(1)?,
                    })
                },
            )
            .map_err(StorageError::read(SONG_SELECT))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::read(SONG_SELECT))?;

        match matches.len() {
            1 => Ok(matches.pop()),
            0 => Ok(None),
            _ => {
                warn!(
                    "Ambiguous song lookup for '{}' by '{}' ({}s), leaving ids empty",
                    key.title, key.artist_name, key.duration
                );
                Ok(None)
            }
        }
    }

    fn insert_songplay(&self, songplay: &Songplay) -> Result<i64, StorageError> {
        self.execute(
            SONGPLAY_INSERT,
            params![
                songplay.start_time,
                songplay.user_id,
                songplay.level.to_db_str(),
                &songplay.song_id,
                &songplay.artist_id,
                songplay.session_id,
                &songplay.location,
                &songplay.user_agent
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn table_counts(&self) -> Result<TableCounts, StorageError> {
        let count = |table: &str| -> Result<usize, StorageError> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                    r.get::<_, i64>(0)
                })
                .map(|n| n as usize)
                .map_err(StorageError::read("SELECT COUNT(*)"))
        };
        let [artists, songs, time, users, songplays] = TABLE_NAMES;
        Ok(TableCounts {
            artists: count(artists)?,
            songs: count(songs)?,
            time: count(time)?,
            users: count(users)?,
            songplays: count(songplays)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Level;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            artist_id: id.to_string(),
            name: name.to_string(),
            location: Some("Dublin".to_string()),
            latitude: Some(53.35),
            longitude: None,
        }
    }

    fn song(id: &str, title: &str, artist_id: &str, duration: f64) -> Song {
        Song {
            song_id: id.to_string(),
            title: title.to_string(),
            artist_id: artist_id.to_string(),
            year: 2004,
            duration,
        }
    }

    fn user(id: i64, level: Level) -> User {
        User {
            user_id: id,
            first_name: Some("Lily".to_string()),
            last_name: Some("Koch".to_string()),
            gender: Some("F".to_string()),
            level,
        }
    }

    #[test]
    fn test_artist_and_song_inserts_are_idempotent() {
        let store = SqliteWarehouse::open_in_memory().unwrap();

        assert!(store.insert_artist(&artist("AR1", "Elena")).unwrap());
        assert!(!store.insert_artist(&artist("AR1", "Elena")).unwrap());
        assert!(store
            .insert_song(&song("SO1", "Setanta matins", "AR1", 269.58))
            .unwrap());
        assert!(!store
            .insert_song(&song("SO1", "Setanta matins", "AR1", 269.58))
            .unwrap());

        let counts = store.table_counts().unwrap();
        assert_eq!(counts.artists, 1);
        assert_eq!(counts.songs, 1);
    }

    #[test]
    fn test_user_upsert_keeps_last_level() {
        let store = SqliteWarehouse::open_in_memory().unwrap();

        store.upsert_user(&user(15, Level::Free)).unwrap();
        store.upsert_user(&user(15, Level::Paid)).unwrap();

        let level: String = store
            .connection()
            .query_row("SELECT level FROM users WHERE user_id = 15", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(level, "paid");
        assert_eq!(store.table_counts().unwrap().users, 1);
    }

    #[test]
    fn test_duplicate_time_rows_are_ignored() {
        let store = SqliteWarehouse::open_in_memory().unwrap();
        let start_time = NaiveDate::from_ymd_opt(2018, 11, 1)
            .unwrap()
            .and_hms_milli_opt(13, 40, 0, 0)
            .unwrap();
        let row = TimeRow {
            start_time,
            hour: 13,
            day: 1,
            week: 44,
            month: 11,
            year: 2018,
            weekday: 3,
        };

        assert!(store.insert_time(&row).unwrap());
        assert!(!store.insert_time(&row).unwrap());
        assert_eq!(store.table_counts().unwrap().time, 1);
    }

    #[test]
    fn test_find_song_within_tolerance() {
        let store = SqliteWarehouse::open_in_memory().unwrap();
        store.insert_artist(&artist("AR1", "Elena")).unwrap();
        store
            .insert_song(&song("SO1", "Setanta matins", "AR1", 269.58))
            .unwrap();

        let found = store
            .find_song(&SongKey {
                title: "Setanta matins",
                artist_name: "Elena",
                duration: 269.5800001,
            })
            .unwrap();
        assert_eq!(
            found,
            Some(SongMatch {
                song_id: "SO1".to_string(),
                artist_id: "AR1".to_string(),
            })
        );

        let wrong_duration = store
            .find_song(&SongKey {
                title: "Setanta matins",
                artist_name: "Elena",
                duration: 270.0,
            })
            .unwrap();
        assert_eq!(wrong_duration, None);

        let wrong_artist = store
            .find_song(&SongKey {
                title: "Setanta matins",
                artist_name: "Someone Else",
                duration: 269.58,
            })
            .unwrap();
        assert_eq!(wrong_artist, None);
    }

    #[test]
    fn test_ambiguous_lookup_is_no_match() {
        let store = SqliteWarehouse::open_in_memory().unwrap();
        store.insert_artist(&artist("AR1", "Elena")).unwrap();
        store.insert_artist(&artist("AR2", "Elena")).unwrap();
        store
            .insert_song(&song("SO1", "Setanta matins", "AR1", 269.58))
            .unwrap();
        store
            .insert_song(&song("SO2", "Setanta matins", "AR2", 269.58))
            .unwrap();

        let found = store
            .find_song(&SongKey {
                title: "Setanta matins",
                artist_name: "Elena",
                duration: 269.58,
            })
            .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_songplay_ids_are_generated() {
        let store = SqliteWarehouse::open_in_memory().unwrap();
        let songplay = Songplay {
            start_time: NaiveDate::from_ymd_opt(2018, 11, 1)
                .unwrap()
                .and_hms_milli_opt(13, 40, 0, 0)
                .unwrap(),
            user_id: Some(15),
            level: Level::Paid,
            song_id: None,
            artist_id: None,
            session_id: 818,
            location: None,
            user_agent: None,
        };

        let first = store.insert_songplay(&songplay).unwrap();
        let second = store.insert_songplay(&songplay).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.table_counts().unwrap().songplays, 2);
    }

    #[test]
    fn test_rollback_discards_writes() {
        let store = SqliteWarehouse::open_in_memory().unwrap();

        store.begin().unwrap();
        store.insert_artist(&artist("AR1", "Elena")).unwrap();
        store.rollback().unwrap();
        assert_eq!(store.table_counts().unwrap().artists, 0);

        store.begin().unwrap();
        store.insert_artist(&artist("AR1", "Elena")).unwrap();
        store.commit().unwrap();
        assert_eq!(store.table_counts().unwrap().artists, 1);
    }

    #[test]
    fn test_open_requires_existing_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("empty.db");

        // Missing file
        assert!(matches!(
            SqliteWarehouse::open(&db_path),
            Err(StorageError::Connection { .. })
        ));

        // File without the schema
        Connection::open(&db_path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x INTEGER);")
            .unwrap();
        assert!(matches!(
            SqliteWarehouse::open(&db_path),
            Err(StorageError::Schema(_))
        ));

        SqliteWarehouse::create(&db_path, true).unwrap();
        assert!(SqliteWarehouse::open(&db_path).is_ok());
    }
}

//! Activity log files: time, user and songplay rows from song-play events.

use super::time_dim::{start_time_from_millis, time_row};
use super::{LoadStats, RecordHandler};
use crate::error::{EtlResult, StorageError};
use crate::records::LogEvent;
use crate::warehouse::{SongKey, SongMatch, Songplay, User, WarehouseStore};
use chrono::NaiveDateTime;
use tracing::debug;

/// Loads the song plays of one activity log.
///
/// Events other than song plays are dropped. For every play, in order:
/// a time row, the user (upserted on its id, last level wins), and the
/// songplay fact with song and artist ids resolved against the warehouse.
pub fn load_log(store: &dyn WarehouseStore, events: &[LogEvent]) -> EtlResult<LoadStats> {
    let mut stats = LoadStats::default();

    let plays = events
        .iter()
        .filter(|event| event.is_song_play())
        .map(with_start_time)
        .collect::<EtlResult<Vec<_>>>()?;
    stats.skipped_events = events.len() - plays.len();

    for (_, start_time) in &plays {
        if store.insert_time(&time_row(*start_time))? {
            stats.time_rows += 1;
        }
    }

    for (event, _) in &plays {
        match user_from_event(event) {
            Some(user) => {
                store.upsert_user(&user)?;
                stats.users += 1;
            }
            None => {
                debug!(
                    "Song play at {} in session {} has no user id, skipping user row",
                    event.ts, event.session_id
                );
                stats.skipped_users += 1;
            }
        }
    }

    for (event, start_time) in &plays {
        let song = resolve_song(store, event)?;
        if song.is_some() {
            stats.matched_songplays += 1;
        }
        let (song_id, artist_id) = match song {
            Some(SongMatch { song_id, artist_id }) => (Some(song_id), Some(artist_id)),
            None => (None, None),
        };
        store.insert_songplay(&Songplay {
            start_time: *start_time,
            user_id: event.user_id,
            level: event.level,
            song_id,
            artist_id,
            session_id: event.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
        })?;
        stats.songplays += 1;
    }

    Ok(stats)
}

fn with_start_time(event: &LogEvent) -> EtlResult<(&LogEvent, NaiveDateTime)> {
    Ok((event, start_time_from_millis(event.ts)?))
}

fn user_from_event(event: &LogEvent) -> Option<User> {
    event.user_id.map(|user_id| User {
        user_id,
        first_name: event.first_name.clone(),
        last_name: event.last_name.clone(),
        gender: event.gender.clone(),
        level: event.level,
    })
}

fn resolve_song(
    store: &dyn WarehouseStore,
    event: &LogEvent,
) -> Result<Option<SongMatch>, StorageError> {
    let (Some(title), Some(artist_name), Some(duration)) =
        (event.song.as_deref(), event.artist.as_deref(), event.length)
    else {
        debug!("Song play at {} lacks song, artist or length", event.ts);
        return Ok(None);
    };

    let found = store.find_song(&SongKey {
        title,
        artist_name,
        duration,
    })?;
    if let Some(song) = &found {
        debug!(
            "Resolved '{}' by '{}' to {} / {}",
            title, artist_name, song.song_id, song.artist_id
        );
    }
    Ok(found)
}

pub struct LogFileLoader;

impl RecordHandler for LogFileLoader {
    type Record = LogEvent;

    fn name(&self) -> &'static str {
        "log"
    }

    fn load(&self, store: &dyn WarehouseStore, records: &[LogEvent]) -> EtlResult<LoadStats> {
        load_log(store, records)
    }
}

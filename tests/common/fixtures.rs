//! Data file fixtures written into temporary directories.

use super::constants::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `records` as one JSON object per line at `root/relative`.
pub fn write_json_lines(root: &Path, relative: &str, records: &[Value]) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content = records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&path, content + "\n").unwrap();
    path
}

pub fn song_record(
    song_id: &str,
    title: &str,
    duration: f64,
    artist_id: &str,
    artist_name: &str,
) -> Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
}

/// A `NextSong` event in session 818.
pub fn play_event(ts: i64, user_id: &str, level: &str, played: PlayedSong) -> Value {
    let (song, artist, length) = played;
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Lily",
        "gender": "F",
        "itemInSession": 1,
        "lastName": "Koch",
        "length": length,
        "level": level,
        "location": "Chicago-Naperville-Elgin, IL-IN-WI",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1541048010796.0,
        "sessionId": SESSION_ID,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": USER_AGENT,
        "userId": user_id
    })
}

pub fn page_event(ts: i64, page: &str) -> Value {
    json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": "Lily",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Koch",
        "length": null,
        "level": "free",
        "location": "Chicago-Naperville-Elgin, IL-IN-WI",
        "method": "GET",
        "page": page,
        "registration": 1541048010796.0,
        "sessionId": SESSION_ID,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": USER_AGENT,
        "userId": "15"
    })
}

/// Two song files in nested directories, as the song dataset lays them out.
pub fn write_song_data(root: &Path) {
    write_json_lines(
        root,
        "A/A/A/TRAAAAW128F429D538.json",
        &[song_record(
            SONG_1_ID,
            SONG_1_TITLE,
            SONG_1_DURATION,
            ARTIST_1_ID,
            ARTIST_1_NAME,
        )],
    );
    write_json_lines(
        root,
        "A/B/C/TRABCEI128F424C983.json",
        &[song_record(
            SONG_2_ID,
            SONG_2_TITLE,
            SONG_2_DURATION,
            ARTIST_2_ID,
            ARTIST_2_NAME,
        )],
    );
}

//! Row models of the warehouse tables.

use crate::records::Level;
use chrono::NaiveDateTime;

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

/// Calendar breakdown of a play's start time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Days since Monday (Monday = 0, Sunday = 6).
    pub weekday: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Level,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Songplay {
    pub start_time: NaiveDateTime,
    pub user_id: Option<i64>,
    pub level: Level,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// What a play event tells us about the song it played.
#[derive(Clone, Debug, PartialEq)]
pub struct SongKey<'a> {
    pub title: &'a str,
    pub artist_name: &'a str,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Number of rows currently stored in each table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub artists: usize,
    pub songs: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}

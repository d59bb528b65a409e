//! Identifiers shared by fixtures and assertions.

pub const ARTIST_1_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_1_NAME: &str = "Elena";
pub const SONG_1_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_1_TITLE: &str = "Setanta matins";
pub const SONG_1_DURATION: f64 = 269.58;

pub const ARTIST_2_ID: &str = "ARD7TVE1187B99BFB1";
pub const ARTIST_2_NAME: &str = "Casual";
pub const SONG_2_ID: &str = "SOMZWCG12A8C13C480";
pub const SONG_2_TITLE: &str = "I Didn't Mean To";
pub const SONG_2_DURATION: f64 = 218.93179;

/// Title, artist name and duration of a played song.
pub type PlayedSong = (&'static str, &'static str, f64);

pub const SONG_1: PlayedSong = (SONG_1_TITLE, ARTIST_1_NAME, SONG_1_DURATION);
pub const SONG_2: PlayedSong = (SONG_2_TITLE, ARTIST_2_NAME, SONG_2_DURATION);
/// A song that no song-data file describes.
pub const UNKNOWN_SONG: PlayedSong = ("Not in the catalog", "Nobody", 123.0);

pub const SESSION_ID: i64 = 818;
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_4)";

/// 2018-11-01 13:40:00 UTC, a Thursday in ISO week 44.
pub const TS_1: i64 = 1541079600000;
/// 2018-11-02 01:25:34.796 UTC
pub const TS_2: i64 = 1541121934796;
/// 2018-11-03 09:00:00 UTC
pub const TS_3: i64 = 1541235600000;

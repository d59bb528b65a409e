mod decoder;
mod log_event;
mod song_record;

pub use decoder::{read_records, read_single_record};
pub use log_event::{Level, LogEvent, NEXT_SONG_PAGE};
pub use song_record::SongRecord;

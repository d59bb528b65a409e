use crate::error::{EtlError, EtlResult};
use crate::warehouse::TimeRow;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};

/// Converts a log timestamp (milliseconds since the Unix epoch) to UTC
/// calendar time.
pub fn start_time_from_millis(ts: i64) -> EtlResult<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|dt| dt.naive_utc())
        .ok_or(EtlError::InvalidTimestamp(ts))
}

pub fn time_row(start_time: NaiveDateTime) -> TimeRow {
    TimeRow {
        start_time,
        hour: start_time.hour(),
        day: start_time.day(),
        week: start_time.iso_week().week(),
        month: start_time.month(),
        year: start_time.year(),
        weekday: start_time.weekday().num_days_from_monday(),
    }
}

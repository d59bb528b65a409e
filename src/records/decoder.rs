//! Newline-delimited JSON decoding.

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Reads every record of a one-object-per-line JSON file, in line order.
///
/// Blank lines are skipped. The first line that fails to deserialize into `T`
/// aborts the whole file, so no partially decoded file ever reaches storage.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DecodeError> {
    let content = fs::read_to_string(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<T>(line).map_err(|source| DecodeError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Reads a file that must hold exactly one record.
pub fn read_single_record<T: DeserializeOwned>(path: &Path) -> Result<T, DecodeError> {
    let mut records = read_records::<T>(path)?;
    if records.len() != 1 {
        return Err(DecodeError::RecordCount {
            path: path.to_path_buf(),
            expected: 1,
            found: records.len(),
        });
    }
    Ok(records.remove(0))
}

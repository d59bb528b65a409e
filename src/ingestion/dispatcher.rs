//! Data file discovery and the per-file load loop.

use super::{LoadStats, RecordHandler};
use crate::error::{EtlError, EtlResult};
use crate::warehouse::WarehouseStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const DATA_FILE_EXTENSION: &str = "json";

/// Progress after a file has been committed. `index` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct FileProgress<'a> {
    pub index: usize,
    pub total: usize,
    pub path: &'a Path,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub stats: LoadStats,
}

fn is_data_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(true);
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e == DATA_FILE_EXTENSION)
        .unwrap_or(false);
    !hidden && has_extension
}

/// Lists every data file below `root`, recursively.
///
/// Entries are visited sorted by file name within each directory, so the
/// order is the same from one run to the next. Symlinks are followed. A root
/// that does not exist holds no files.
pub fn find_data_files(root: &Path) -> EtlResult<Vec<PathBuf>> {
    if !root.is_dir() {
        warn!("Data directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_data_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Loads every data file under `root` with `handler`, one transaction per file.
///
/// Each file is decoded, handed to the handler and committed before the next
/// one is touched, then `on_progress` is called. The first failure rolls back
/// the current file and stops the run; files committed before it stay.
pub fn process_data<H: RecordHandler>(
    store: &dyn WarehouseStore,
    root: &Path,
    handler: &H,
    on_progress: &mut dyn FnMut(FileProgress<'_>),
) -> EtlResult<ProcessSummary> {
    let files = find_data_files(root)?;
    let total = files.len();
    info!("{} files found in {}", total, root.display());

    let mut summary = ProcessSummary {
        files_found: total,
        ..Default::default()
    };

    for (index, path) in files.iter().enumerate() {
        let stats = match load_file(store, path, handler) {
            Ok(stats) => stats,
            Err(e) => return Err(e.in_file(path.clone())),
        };
        summary.stats += stats;
        summary.files_processed += 1;

        info!("{}/{} files processed.", index + 1, total);
        on_progress(FileProgress {
            index: index + 1,
            total,
            path,
        });
    }

    Ok(summary)
}

fn load_file<H: RecordHandler>(
    store: &dyn WarehouseStore,
    path: &Path,
    handler: &H,
) -> EtlResult<LoadStats> {
    let records = handler.decode(path)?;

    store.begin()?;
    let result = handler
        .load(store, &records)
        .and_then(|stats| store.commit().map(|_| stats).map_err(EtlError::from));

    if result.is_err() {
        if let Err(e) = store.rollback() {
            warn!(
                "Rollback of {} file {} failed: {}",
                handler.name(),
                path.display(),
                e
            );
        }
    }
    result
}

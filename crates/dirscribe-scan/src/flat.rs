//! Iterative builder for the flat file list.

use std::fs;
use std::path::Path;

use dirscribe_core::{FileRecord, ScanConfig, ScanError, ScanWarning, WarningKind};

use crate::observer::ScanObserver;
use crate::walk::{WalkEntry, error_path, is_directory, read_failure, walk_dir};

/// Result of a flat listing.
#[derive(Debug, Clone, Default)]
pub struct FlatListing {
    /// One record per file, in walk order.
    pub records: Vec<FileRecord>,
    /// Messages for entries that were skipped.
    pub errors: Vec<String>,
}

impl FlatListing {
    /// Check if any entry was skipped.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn walk_error(&mut self, observer: &mut dyn ScanObserver, err: &jwalk::Error, fallback: &Path) {
        let message = format!("Error scanning directory: {err}");
        observer.warning(&ScanWarning::new(
            error_path(err, fallback),
            &message,
            WarningKind::ReadError,
        ));
        self.errors.push(message);
    }
}

/// Lists every file below a root, one record each.
///
/// Directories are walked but not recorded, and symlinks to directories are neither
/// recorded nor descended. Order follows directory enumeration, not names.
pub struct FlatLister {
    config: ScanConfig,
}

impl FlatLister {
    /// Create a flat lister.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Walk `root` and collect a record for every file found.
    pub fn list(&self, root: &Path, observer: &mut dyn ScanObserver) -> FlatListing {
        let mut listing = FlatListing::default();

        for entry_result in walk_dir(root, &self.config) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    listing.walk_error(observer, &err, root);
                    continue;
                }
            };

            if let Some(err) = read_failure(&entry) {
                listing.walk_error(observer, err, &entry.path());
            }

            if entry.depth == 0 {
                continue;
            }

            if is_directory(&entry) {
                tracing::debug!(path = %entry.path().display(), "entering directory");
                continue;
            }

            let path = entry.path();
            match file_record(root, &entry) {
                Ok(record) => {
                    tracing::debug!(
                        relative_path = %record.relative_path,
                        size = record.size,
                        "added"
                    );
                    observer.entry_visited(&path);
                    listing.records.push(record);
                }
                Err(err) => {
                    let message = format!(
                        "Error processing file {}: {err}",
                        entry.file_name().to_string_lossy()
                    );
                    observer.warning(&ScanWarning::new(&path, &message, WarningKind::EntryError));
                    listing.errors.push(message);
                }
            }
        }

        if listing.has_errors() {
            tracing::debug!(errors = listing.errors.len(), "listing finished with errors");
        }

        listing
    }
}

fn file_record(root: &Path, entry: &WalkEntry) -> Result<FileRecord, ScanError> {
    let path = entry.path();
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ScanError::OutsideRoot {
            path: path.clone(),
            root: root.to_path_buf(),
        })?;

    // Vanished, dangling, looping or unreadable targets all count as empty
    let size = match fs::metadata(&path) {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "size unavailable, recording 0");
            0
        }
    };

    Ok(FileRecord::new(
        entry.file_name().to_string_lossy(),
        path.to_string_lossy(),
        relative.to_string_lossy(),
        size,
    ))
}

//! Aggregate statistics over a flat file listing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::FileRecord;

/// Histogram label for names without an extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// Number of extensions shown in the console summary.
pub const TOP_EXTENSIONS: usize = 10;

/// Extract the extension of a file name, including the leading dot.
///
/// Leading dots do not start an extension, so `.bashrc` has none while
/// `archive.tar.gz` yields `.gz`.
pub fn extension_of(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    if name[..dot].bytes().all(|b| b == b'.') {
        return None;
    }
    Some(&name[dot..])
}

/// Count of files per extension, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionHistogram {
    counts: IndexMap<String, u64>,
}

impl ExtensionHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file name.
    pub fn record(&mut self, name: &str) {
        let key = extension_of(name).unwrap_or(NO_EXTENSION);
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Count for a given extension key.
    pub fn get(&self, extension: &str) -> Option<u64> {
        self.counts.get(extension).copied()
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most common extensions, by descending count.
    ///
    /// Ties keep first-encounter order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

/// Summary statistics for a flat listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// Number of records.
    pub file_count: u64,
    /// Sum of all record sizes in bytes.
    pub total_size: u64,
    /// Files per extension.
    pub extensions: ExtensionHistogram,
}

impl ListSummary {
    /// Create new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a whole listing.
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.record(record);
        }
        summary
    }

    /// Update the summary with one record.
    pub fn record(&mut self, record: &FileRecord) {
        self.file_count += 1;
        self.total_size += record.size;
        self.extensions.record(&record.name);
    }

    /// Total size in mebibytes.
    pub fn total_size_mib(&self) -> f64 {
        self.total_size as f64 / 1024.0 / 1024.0
    }
}

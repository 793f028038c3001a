//! Scan observation: progress and diagnostics.

use std::path::Path;

use dirscribe_core::ScanWarning;

/// Receives events from the scanners as they run.
///
/// Scanners never log recoverable failures themselves; they hand them to the observer,
/// which decides where they go. Progress displays hook into [`entry_visited`].
///
/// [`entry_visited`]: ScanObserver::entry_visited
pub trait ScanObserver {
    /// Called once for every entry a scanner processes.
    fn entry_visited(&mut self, _path: &Path) {}

    /// Called for every recoverable failure, before the scan continues.
    fn warning(&mut self, warning: &ScanWarning);
}

impl<T: ScanObserver + ?Sized> ScanObserver for &mut T {
    fn entry_visited(&mut self, path: &Path) {
        (**self).entry_visited(path);
    }

    fn warning(&mut self, warning: &ScanWarning) {
        (**self).warning(warning);
    }
}

/// Observer that forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn warning(&mut self, warning: &ScanWarning) {
        if warning.kind.is_error() {
            tracing::error!(path = %warning.path.display(), "{}", warning.message);
        } else {
            tracing::warn!(path = %warning.path.display(), "{}", warning.message);
        }
    }
}

/// Observer that keeps everything it is told.
#[derive(Debug, Default, Clone)]
pub struct CollectingObserver {
    /// Number of entries visited so far.
    pub visited: u64,
    /// Warnings in the order they were reported.
    pub warnings: Vec<ScanWarning>,
}

impl CollectingObserver {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any warning was reported.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl ScanObserver for CollectingObserver {
    fn entry_visited(&mut self, _path: &Path) {
        self.visited += 1;
    }

    fn warning(&mut self, warning: &ScanWarning) {
        self.warnings.push(warning.clone());
    }
}

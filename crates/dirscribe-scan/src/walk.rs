//! Shared jwalk setup for the iterative scanners.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{DirEntry, Parallelism, WalkDir};

use dirscribe_core::ScanConfig;

/// Entry type yielded by [`walk_dir`].
pub(crate) type WalkEntry = DirEntry<((), ())>;

/// Serial, non-following walk over `root` and everything below it in directory
/// enumeration order.
///
/// The root itself is yielded at depth 0 so a failure to read it surfaces through
/// [`read_failure`]; callers skip it otherwise.
pub(crate) fn walk_dir(root: &Path, config: &ScanConfig) -> WalkDir {
    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(!config.include_hidden)
        .follow_links(false)
        .sort(false)
}

/// Error hit while listing this directory's children.
///
/// jwalk does not yield these as `Err` items; they ride on the directory's own entry.
pub(crate) fn read_failure(entry: &WalkEntry) -> Option<&jwalk::Error> {
    entry.read_children_error.as_ref()
}

/// Whether the entry is a directory, resolving symlinks the way `stat` does.
pub(crate) fn is_directory(entry: &WalkEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return true;
    }
    file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}

/// Path attached to a walk error, or `fallback` when jwalk has none.
pub(crate) fn error_path(err: &jwalk::Error, fallback: &Path) -> PathBuf {
    err.path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf())
}

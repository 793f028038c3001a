//! Recursive builder for the tree form.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

use dirscribe_core::{
    CANNOT_GET_FILE_SIZE, FsNode, PERMISSION_DENIED, ScanConfig, ScanError, ScanWarning,
};

use crate::inode::{AncestorGuard, DirKey};
use crate::observer::ScanObserver;

/// Builds a nested [`FsNode`] for every entry below a root.
///
/// Descent is depth-first and pre-order, children in ascending name order. Symlinks
/// are followed; a link back into an ancestor recurses until the OS refuses to resolve
/// the path, unless [`ScanConfig::detect_cycles`] is set.
pub struct TreeBuilder {
    config: ScanConfig,
}

impl TreeBuilder {
    /// Create a tree builder.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Build the tree rooted at `path`.
    ///
    /// Never fails: problems below the root become `error` fields or degraded nodes.
    pub fn build(&self, path: &Path, observer: &mut dyn ScanObserver) -> FsNode {
        let mut guard = self.config.detect_cycles.then(AncestorGuard::new);

        match self.build_node(path, guard.as_mut(), observer) {
            Ok(node) => node,
            Err(err) => {
                observer.warning(&ScanWarning::entry_error(path, &err));
                FsNode::degraded(node_name(path), display_path(path), err.to_string())
            }
        }
    }

    fn build_node(
        &self,
        path: &Path,
        guard: Option<&mut AncestorGuard>,
        observer: &mut dyn ScanObserver,
    ) -> Result<FsNode, ScanError> {
        observer.entry_visited(path);

        let name = node_name(path);
        let path_str = display_path(path);
        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_dir() => m,
            Ok(m) => {
                tracing::debug!(path = %path.display(), size = m.len(), "file");
                return Ok(FsNode::new_file(name, path_str, Some(m.len())));
            }
            Err(err) => {
                observer.warning(&ScanWarning::metadata_error(path, &err));
                let node = FsNode::new_file(name, path_str, None);
                return Ok(node.with_error(CANNOT_GET_FILE_SIZE));
            }
        };

        let key = guard
            .as_ref()
            .and_then(|_| DirKey::from_metadata(&metadata));

        match (guard, key) {
            (Some(guard), Some(key)) => {
                if !guard.enter(key) {
                    return Err(ScanError::SymlinkCycle {
                        path: path.to_path_buf(),
                    });
                }
                let node = self.build_directory(path, name, path_str, Some(&mut *guard), observer);
                guard.leave(key);
                Ok(node)
            }
            (guard, _) => Ok(self.build_directory(path, name, path_str, guard, observer)),
        }
    }

    fn build_directory(
        &self,
        path: &Path,
        name: CompactString,
        path_str: String,
        mut guard: Option<&mut AncestorGuard>,
        observer: &mut dyn ScanObserver,
    ) -> FsNode {
        let mut node = FsNode::new_directory(name, path_str);

        let entries = match read_sorted_entries(path) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                observer.warning(&ScanWarning::permission_denied(path));
                return node.with_error(PERMISSION_DENIED);
            }
            Err(err) => {
                observer.warning(&ScanWarning::read_error(path, &err));
                return node.with_error(err.to_string());
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "scanning directory");

        for (entry_name, entry_path) in entries {
            if self.config.should_skip_hidden(&entry_name) {
                continue;
            }

            match self.build_node(&entry_path, guard.as_deref_mut(), observer) {
                Ok(child) => node.push_child(child),
                Err(err) => {
                    observer.warning(&ScanWarning::entry_error(&entry_path, &err));
                    node.push_child(FsNode::degraded(
                        entry_name,
                        display_path(&entry_path),
                        err.to_string(),
                    ));
                }
            }
        }

        node
    }
}

/// List a directory's entries sorted by name.
///
/// All-or-nothing: a failure on any entry fails the whole listing.
fn read_sorted_entries(path: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut entries = fs::read_dir(path)?
        .map(|entry| {
            entry.map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
        })
        .collect::<io::Result<Vec<_>>>()?;

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Final path component, or the whole path when there is none (e.g. `/`).
fn node_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

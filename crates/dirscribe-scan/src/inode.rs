//! Directory identity tracking for symlink cycle detection.

use std::collections::HashSet;
use std::fs::Metadata;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Identity of a directory on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirKey {
    /// Device ID.
    pub device: u64,
    /// Inode number.
    pub inode: u64,
}

impl DirKey {
    /// Create a new key.
    pub fn new(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }

    /// Identity of the entry described by `metadata`, where the platform exposes one.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        Some(Self::new(metadata.dev(), metadata.ino()))
    }

    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}

/// Tracks the directories on the current descent path.
///
/// A directory reached again while one of its own copies is still being built means
/// a symlink points back into an ancestor.
#[derive(Debug, Default)]
pub struct AncestorGuard {
    active: HashSet<DirKey>,
}

impl AncestorGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self {
            active: HashSet::new(),
        }
    }

    /// Enter a directory. Returns `false` if it is already an ancestor.
    pub fn enter(&mut self, key: DirKey) -> bool {
        self.active.insert(key)
    }

    /// Leave a directory entered earlier.
    pub fn leave(&mut self, key: DirKey) {
        self.active.remove(&key);
    }

    /// Current descent depth.
    pub fn depth(&self) -> usize {
        self.active.len()
    }
}

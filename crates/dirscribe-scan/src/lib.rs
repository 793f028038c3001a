//! Directory traversal engine for dirscribe.
//!
//! Three independent, single-threaded scanners share one configuration:
//!
//! - [`EntryCounter`] pre-counts entries so progress displays can be sized
//! - [`TreeBuilder`] recursively builds the nested tree form
//! - [`FlatLister`] walks iteratively (via jwalk) and records one entry per file
//!
//! None of them fail once started. Recoverable problems are reported to a
//! [`ScanObserver`] and the scan carries on.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use dirscribe_scan::{FlatLister, LogObserver, ScanConfig, TreeBuilder};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let mut observer = LogObserver;
//!
//! let tree = TreeBuilder::new(&config).build(&config.root, &mut observer);
//! println!("{} nodes", tree.node_count());
//!
//! let listing = FlatLister::new(&config).list(Path::new("/path/to/scan"), &mut observer);
//! println!("{} files, {} skipped", listing.records.len(), listing.errors.len());
//! ```

mod counter;
mod flat;
mod inode;
mod observer;
mod tree;
mod walk;

pub use counter::EntryCounter;
pub use flat::{FlatListing, FlatLister};
pub use inode::{AncestorGuard, DirKey};
pub use observer::{CollectingObserver, LogObserver, ScanObserver};
pub use tree::TreeBuilder;

// Re-export core types for convenience
pub use dirscribe_core::{
    FileRecord, FsNode, ListSummary, NodeKind, ScanConfig, ScanError, ScanWarning, WarningKind,
};

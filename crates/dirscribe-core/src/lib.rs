//! Core types for dirscribe.
//!
//! This crate provides the data structures shared by the scanners and the CLI:
//! tree nodes, flat file records, configuration, listing statistics and JSON export.

mod config;
mod error;
mod export;
mod node;
mod summary;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use export::{to_json_string, write_json};
pub use node::{CANNOT_GET_FILE_SIZE, FileRecord, FsNode, NodeKind, PERMISSION_DENIED};
pub use summary::{ExtensionHistogram, ListSummary, NO_EXTENSION, TOP_EXTENSIONS, extension_of};

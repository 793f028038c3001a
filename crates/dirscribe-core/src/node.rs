//! Tree nodes and flat file records.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Message stored on a directory whose entries could not be listed for lack of permission.
pub const PERMISSION_DENIED: &str = "Permission denied";

/// Message stored on a file whose size could not be read.
pub const CANNOT_GET_FILE_SIZE: &str = "Cannot get file size";

/// Type of file system node, carrying the kind-specific payload.
///
/// Serialized inline into [`FsNode`] with a `"type"` tag, so a directory reads
/// `{"type": "directory", "children": [...]}` and a file `{"type": "file", "size": 5}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory with its children sorted by name.
    Directory {
        /// Child nodes in ascending name order.
        children: Vec<FsNode>,
    },
    /// Regular file (or anything else that is not a directory).
    File {
        /// Size in bytes, when it could be read.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }
}

/// A single entry in the tree form.
///
/// `kind` is `None` only for degraded nodes, which record that building the entry
/// failed; such nodes always carry `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsNode {
    /// Base name, or the whole path when it has no final component (e.g. `/`).
    pub name: CompactString,

    /// Path as constructed from the scan root.
    pub path: String,

    /// Node type and payload.
    #[serde(flatten)]
    pub kind: Option<NodeKind>,

    /// Diagnostic set when kind-specific information could not be obtained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FsNode {
    /// Create a directory node with no children.
    pub fn new_directory(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: Some(NodeKind::Directory {
                children: Vec::new(),
            }),
            error: None,
        }
    }

    /// Create a file node.
    pub fn new_file(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        size: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: Some(NodeKind::File { size }),
            error: None,
        }
    }

    /// Create a degraded node for an entry that could not be built at all.
    pub fn degraded(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: None,
            error: Some(error.into()),
        }
    }

    /// Attach a diagnostic message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.as_ref().is_some_and(NodeKind::is_dir)
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.as_ref().is_some_and(NodeKind::is_file)
    }

    /// Check if this node is degraded.
    pub fn is_degraded(&self) -> bool {
        self.kind.is_none()
    }

    /// Children of a directory; empty for anything else.
    pub fn children(&self) -> &[FsNode] {
        match &self.kind {
            Some(NodeKind::Directory { children }) => children,
            _ => &[],
        }
    }

    /// Append a child. Ignored unless this node is a directory.
    pub fn push_child(&mut self, child: FsNode) {
        if let Some(NodeKind::Directory { children }) = &mut self.kind {
            children.push(child);
        }
    }

    /// File size, if this is a file whose size is known.
    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            Some(NodeKind::File { size }) => *size,
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> u64 {
        1 + self.children().iter().map(FsNode::node_count).sum::<u64>()
    }
}

/// A single file in the flat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base filename.
    pub name: CompactString,
    /// Path as constructed during the walk.
    pub path: String,
    /// Path relative to the scan root.
    pub relative_path: String,
    /// Size in bytes; 0 when the file vanished before it could be measured.
    pub size: u64,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        relative_path: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            relative_path: relative_path.into(),
            size,
        }
    }
}

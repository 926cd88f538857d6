//! Catalog nodes

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Path of the catalog root
pub const ROOT_PATH: &str = "/";

/// Whether a node is a leaf document or a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry of the file tree
///
/// Children are kept in display order. Files never have children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Stable, unique identifier
    pub id: NodeId,

    /// Display name (last path segment)
    pub name: String,

    /// File or folder
    pub kind: NodeKind,

    /// Root-relative, slash-delimited path
    pub path: String,

    /// Child nodes (folders only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Case-insensitive substring match against the node name
    ///
    /// `needle` must already be lowercased.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Depth-first, pre-order walk over this node and its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`FileNode::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Join a child name onto its parent's path
///
/// Children of the root do not get a doubled separator.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("{}{}", ROOT_PATH, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Last segment of a path, used when no catalog name is available
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("untitled")
}

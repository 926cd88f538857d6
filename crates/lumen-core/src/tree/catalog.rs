//! Catalog input: the static listing a session starts from
//!
//! A catalog is described without paths. Paths are derived while building,
//! so the parent/child path invariant holds by construction; everything else
//! (ids, sibling names, leaf shape) is validated here.

use super::node::{join_path, FileNode, NodeKind, ROOT_PATH};
use crate::error::{LumenError, Result};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unvalidated catalog description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Explicit id; defaults to the derived path
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// File or folder
    pub kind: NodeKind,

    /// Children (folders only)
    #[serde(default)]
    pub children: Vec<CatalogEntry>,
}

impl CatalogEntry {
    /// A folder with children
    pub fn folder(name: impl Into<String>, children: Vec<CatalogEntry>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: NodeKind::Folder,
            children,
        }
    }

    /// A file leaf
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Set an explicit id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LumenError::invalid_catalog(e.to_string()))
    }

    /// Parse a catalog from TOML
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LumenError::invalid_catalog(e.to_string()))
    }

    /// Load a catalog file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text),
            _ => Self::from_json(&text),
        }
    }

    /// Validate and build the node tree rooted at this entry
    pub fn build(&self) -> Result<FileNode> {
        if self.kind != NodeKind::Folder {
            return Err(LumenError::invalid_catalog("root must be a folder"));
        }
        let mut ids = HashSet::new();
        self.build_node(ROOT_PATH.to_string(), &mut ids)
    }

    fn build_node(&self, path: String, ids: &mut HashSet<NodeId>) -> Result<FileNode> {
        if self.name.is_empty() || self.name.contains('/') {
            return Err(LumenError::invalid_catalog(format!(
                "invalid node name {:?} at {}",
                self.name, path
            )));
        }
        if self.kind == NodeKind::File && !self.children.is_empty() {
            return Err(LumenError::invalid_catalog(format!(
                "file {} cannot have children",
                path
            )));
        }

        let id = NodeId::new(self.id.clone().unwrap_or_else(|| path.clone()));
        if !ids.insert(id.clone()) {
            return Err(LumenError::invalid_catalog(format!("duplicate node id {}", id)));
        }

        let mut names = HashSet::new();
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            if !names.insert(child.name.as_str()) {
                return Err(LumenError::invalid_catalog(format!(
                    "duplicate name {:?} under {}",
                    child.name, path
                )));
            }
            children.push(child.build_node(join_path(&path, &child.name), ids)?);
        }

        Ok(FileNode {
            id,
            name: self.name.clone(),
            kind: self.kind,
            path,
            children,
        })
    }
}

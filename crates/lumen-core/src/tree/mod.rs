//! File tree: catalog, expand/collapse bookkeeping, and filtering
//!
//! The catalog is immutable after construction. Expansion is a set of folder
//! ids held beside it, and the filtered view is derived on every read.

mod catalog;
mod node;

pub use catalog::CatalogEntry;
pub use node::{file_name, join_path, FileNode, NodeKind, Walk, ROOT_PATH};

use crate::error::Result;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One display row of the flattened tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub kind: NodeKind,

    /// Nesting level, root is 0
    pub depth: usize,

    /// Whether a folder row is shown open
    pub expanded: bool,
}

/// File tree state
#[derive(Debug, Clone)]
pub struct FileTree {
    /// Immutable catalog
    root: FileNode,

    /// Ids of every folder, for validating expand/collapse targets
    folders: HashSet<NodeId>,

    /// Folders currently open
    expanded: HashSet<NodeId>,

    /// Current filter text as typed
    filter: String,
}

impl FileTree {
    /// Build a tree from a catalog description
    ///
    /// Only the root starts expanded.
    pub fn new(catalog: &CatalogEntry) -> Result<Self> {
        Ok(Self::from_root(catalog.build()?))
    }

    /// Wrap an already built root node
    pub fn from_root(root: FileNode) -> Self {
        let folders = root
            .walk()
            .filter(|n| n.is_folder())
            .map(|n| n.id.clone())
            .collect();
        let mut expanded = HashSet::new();
        expanded.insert(root.id.clone());

        Self {
            root,
            folders,
            expanded,
            filter: String::new(),
        }
    }

    /// The full, unfiltered catalog
    pub fn root(&self) -> &FileNode {
        &self.root
    }

    /// Find a node by id
    pub fn find(&self, id: &NodeId) -> Option<&FileNode> {
        self.root.walk().find(|n| &n.id == id)
    }

    /// Find a node by path
    pub fn find_by_path(&self, path: &str) -> Option<&FileNode> {
        self.root.walk().find(|n| n.path == path)
    }

    // ========== Expansion ==========

    /// Open a folder. Ignored unless `id` names a folder.
    pub fn expand(&mut self, id: &NodeId) {
        if self.folders.contains(id) {
            self.expanded.insert(id.clone());
        } else {
            tracing::debug!(node = %id, "expand ignored: not a folder");
        }
    }

    /// Close a folder. Ignored unless `id` names a folder.
    pub fn collapse(&mut self, id: &NodeId) {
        if self.folders.contains(id) {
            self.expanded.remove(id);
        } else {
            tracing::debug!(node = %id, "collapse ignored: not a folder");
        }
    }

    /// Flip a folder between open and closed
    pub fn toggle(&mut self, id: &NodeId) {
        if self.expanded.contains(id) {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    // ========== Filtering ==========

    /// Store the filter text. Matching is a case-insensitive substring test on names.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The catalog as seen through the current filter
    ///
    /// With an empty filter this is the catalog unchanged. Otherwise only
    /// matching files survive, and a folder survives if its own name matches
    /// or any descendant survives. Order is preserved throughout.
    pub fn visible_tree(&self) -> Vec<FileNode> {
        if self.filter.is_empty() {
            return vec![self.root.clone()];
        }
        let needle = self.filter.to_lowercase();
        prune(&self.root, &needle).into_iter().collect()
    }

    /// Flatten the visible tree into display rows
    ///
    /// Without a filter, children of collapsed folders are skipped. With a
    /// filter every surviving folder is shown open so each match is reachable.
    pub fn visible_rows(&self) -> Vec<FileRow> {
        let filtering = !self.filter.is_empty();
        let mut rows = Vec::new();
        for node in self.visible_tree() {
            self.push_rows(&node, 0, filtering, &mut rows);
        }
        rows
    }

    fn push_rows(&self, node: &FileNode, depth: usize, filtering: bool, rows: &mut Vec<FileRow>) {
        let expanded = node.is_folder() && (filtering || self.expanded.contains(&node.id));
        rows.push(FileRow {
            id: node.id.clone(),
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            depth,
            expanded,
        });
        if expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, filtering, rows);
            }
        }
    }
}

/// Keep matching files and folders that match or lead to a match
fn prune(node: &FileNode, needle: &str) -> Option<FileNode> {
    match node.kind {
        NodeKind::File => node.name_matches(needle).then(|| node.clone()),
        NodeKind::Folder => {
            let children: Vec<FileNode> = node
                .children
                .iter()
                .filter_map(|child| prune(child, needle))
                .collect();
            if children.is_empty() && !node.name_matches(needle) {
                return None;
            }
            Some(FileNode {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind,
                path: node.path.clone(),
                children,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FileTree {
        FileTree::new(
            &CatalogEntry::folder(
                "root",
                vec![
                    CatalogEntry::folder(
                        "src",
                        vec![
                            CatalogEntry::file("main.py").with_id("main"),
                            CatalogEntry::file("config.py").with_id("config"),
                        ],
                    )
                    .with_id("src"),
                    CatalogEntry::file("README.md").with_id("readme"),
                ],
            )
            .with_id("root"),
        )
        .unwrap()
    }

    fn paths(nodes: &[FileNode]) -> Vec<String> {
        nodes
            .iter()
            .flat_map(|n| n.walk().map(|n| n.path.clone()).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn test_filter_keeps_ancestors_of_matches() {
        let mut tree = sample();
        tree.set_filter("main");

        assert_eq!(paths(&tree.visible_tree()), vec!["/", "/src", "/src/main.py"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut tree = sample();
        tree.set_filter("README");
        assert_eq!(paths(&tree.visible_tree()), vec!["/", "/README.md"]);

        tree.set_filter("readme");
        assert_eq!(paths(&tree.visible_tree()), vec!["/", "/README.md"]);
    }

    #[test]
    fn test_matching_folder_keeps_only_matching_children() {
        let mut tree = sample();
        tree.set_filter("src");
        let visible = tree.visible_tree();
        assert_eq!(paths(&visible), vec!["/", "/src"]);
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let mut tree = sample();
        tree.set_filter("zzz");
        assert!(tree.visible_tree().is_empty());
        assert!(tree.visible_rows().is_empty());
    }

    #[test]
    fn test_clearing_filter_restores_catalog() {
        let mut tree = sample();
        let original = tree.visible_tree();

        tree.set_filter("config");
        assert_ne!(tree.visible_tree(), original);

        tree.set_filter("");
        assert_eq!(tree.visible_tree(), original);
        assert_eq!(&tree.visible_tree()[0], tree.root());
    }

    #[test]
    fn test_only_root_starts_expanded() {
        let tree = sample();
        assert!(tree.is_expanded(&NodeId::from("root")));
        assert!(!tree.is_expanded(&NodeId::from("src")));
    }

    #[test]
    fn test_toggle_folder() {
        let mut tree = sample();
        let src = NodeId::from("src");

        tree.toggle(&src);
        assert!(tree.is_expanded(&src));

        tree.toggle(&src);
        assert!(!tree.is_expanded(&src));
    }

    #[test]
    fn test_expand_ignores_files_and_unknown_ids() {
        let mut tree = sample();
        tree.expand(&NodeId::from("main"));
        tree.toggle(&NodeId::from("ghost"));

        assert!(!tree.is_expanded(&NodeId::from("main")));
        assert!(!tree.is_expanded(&NodeId::from("ghost")));
    }

    #[test]
    fn test_rows_respect_expansion() {
        let mut tree = sample();
        let names: Vec<_> = tree.visible_rows().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["root", "src", "README.md"]);

        tree.expand(&NodeId::from("src"));
        let rows = tree.visible_rows();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["root", "src", "main.py", "config.py", "README.md"]);
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn test_rows_open_everything_while_filtering() {
        let mut tree = sample();
        tree.set_filter("config");
        let rows = tree.visible_rows();

        assert!(rows.iter().filter(|r| r.kind == NodeKind::Folder).all(|r| r.expanded));
        assert_eq!(rows.last().unwrap().path, "/src/config.py");
        // Filtering never touches the stored expansion
        assert!(!tree.is_expanded(&NodeId::from("src")));
    }

    #[test]
    fn test_find_by_id_and_path() {
        let tree = sample();
        assert_eq!(tree.find(&NodeId::from("main")).unwrap().path, "/src/main.py");
        assert_eq!(tree.find_by_path("/README.md").unwrap().id, NodeId::from("readme"));
        assert!(tree.find_by_path("/nope").is_none());
    }
}

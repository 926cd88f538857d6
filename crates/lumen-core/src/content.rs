//! Document content lookup
//!
//! The catalog only names files. What a file contains comes from a
//! [`ContentResolver`], consulted when the viewer is projected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text of a document plus the language tag for tokenizing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub language: String,
}

impl Document {
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: language.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// Maps a tree path to its document
pub trait ContentResolver: Send {
    fn resolve(&self, path: &str) -> Option<Document>;
}

/// In-memory resolver keyed by path
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    documents: HashMap<String, Document>,
}

impl StaticContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, path: impl Into<String>, document: Document) -> Self {
        self.insert(path, document);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, document: Document) {
        self.documents.insert(path.into(), document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentResolver for StaticContent {
    fn resolve(&self, path: &str) -> Option<Document> {
        self.documents.get(path).cloned()
    }
}

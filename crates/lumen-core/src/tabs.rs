//! Open document tabs
//!
//! A path is open in at most one tab. If any tab is open, exactly one is
//! active. Every mutating method restores that invariant before returning.

use crate::types::TabId;
use serde::{Deserialize, Serialize};

/// Handle for one open document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Generation-order identifier
    pub id: TabId,

    /// Display name
    pub name: String,

    /// Catalog path this tab shows
    pub path: String,

    /// Unsaved changes marker
    pub is_dirty: bool,

    /// Whether this is the selected tab
    pub is_active: bool,
}

/// Ordered collection of open tabs
#[derive(Debug, Clone)]
pub struct TabSet {
    tabs: Vec<Tab>,
    next_id: u64,
}

impl Default for TabSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TabSet {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            next_id: 1,
        }
    }

    /// Open `path`, or activate the tab that already shows it
    ///
    /// New tabs are appended clean and active. Returns the id of the tab
    /// showing `path` afterwards.
    pub fn open(&mut self, path: impl Into<String>, name: impl Into<String>) -> TabId {
        let path = path.into();
        if let Some(id) = self.find_by_path(&path).map(|t| t.id) {
            self.activate(id);
            return id;
        }

        let id = TabId::new(self.next_id);
        self.next_id += 1;

        for tab in &mut self.tabs {
            tab.is_active = false;
        }
        self.tabs.push(Tab {
            id,
            name: name.into(),
            path,
            is_dirty: false,
            is_active: true,
        });
        tracing::debug!(tab = %id, "tab opened");
        id
    }

    /// Make `id` the only active tab. Unknown ids change nothing.
    pub fn activate(&mut self, id: TabId) -> bool {
        if self.get(id).is_none() {
            tracing::debug!(tab = %id, "activate ignored: no such tab");
            return false;
        }
        for tab in &mut self.tabs {
            tab.is_active = tab.id == id;
        }
        true
    }

    /// Remove a tab and return it
    ///
    /// Closing the active tab hands activation to the first remaining tab by
    /// current order, not to a neighbour or the previously used tab.
    pub fn close(&mut self, id: TabId) -> Option<Tab> {
        let Some(index) = self.tabs.iter().position(|t| t.id == id) else {
            tracing::debug!(tab = %id, "close ignored: no such tab");
            return None;
        };
        let closed = self.tabs.remove(index);
        if closed.is_active {
            if let Some(first) = self.tabs.first_mut() {
                first.is_active = true;
            }
        }
        Some(closed)
    }

    /// Set the dirty flag. Activation is untouched.
    pub fn mark_dirty(&mut self, id: TabId, dirty: bool) -> bool {
        match self.tabs.iter_mut().find(|t| t.id == id) {
            Some(tab) => {
                tab.is_dirty = dirty;
                true
            }
            None => false,
        }
    }

    // ========== Queries ==========

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.is_active)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn as_slice(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn dirty_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.is_dirty).count()
    }

    /// Whether the single-active-tab invariant holds
    pub fn is_consistent(&self) -> bool {
        let active = self.tabs.iter().filter(|t| t.is_active).count();
        active == usize::from(!self.tabs.is_empty())
    }
}

//! Commands that any frontend can send to a Lumen session
//!
//! These cover every user action the workspace understands. They are
//! serializable so a frontend can speak JSON to the session.

use crate::panels::PanelId;
use crate::types::{NodeId, TabId};
use serde::{Deserialize, Serialize};

/// Commands that a frontend sends to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Open a file from the tree and show it
    SelectFile {
        /// Tree path of the file
        path: String,
    },

    /// Activate an open tab
    ClickTab { id: TabId },

    /// Close an open tab
    CloseTab { id: TabId },

    /// Flag or clear unsaved changes on a tab
    MarkDirty { id: TabId, dirty: bool },

    /// Switch the side panel
    SelectPanel { panel: PanelId },

    /// Replace the tree filter; an empty string clears it
    SetTreeFilter { query: String },

    /// Open or close a folder
    ToggleFolder { id: NodeId },

    ExpandFolder { id: NodeId },

    CollapseFolder { id: NodeId },

    /// Send a message to the assistant
    SubmitMessage { text: String },

    /// Run a command in the console
    SubmitCommand { text: String },

    /// Pick the assistant model
    SelectModel { model: String },

    /// Pick the agent replies are attributed to
    SelectAgent { agent: String },

    /// Move the virtual clock forward
    Advance {
        /// Milliseconds to advance by
        ms: u64,
    },

    /// Publish the current snapshot
    GetSnapshot,

    /// Cancel pending follow-ups and close the session
    Shutdown,
}

impl Command {
    pub fn select_file(path: impl Into<String>) -> Self {
        Command::SelectFile { path: path.into() }
    }

    pub fn click_tab(id: TabId) -> Self {
        Command::ClickTab { id }
    }

    pub fn close_tab(id: TabId) -> Self {
        Command::CloseTab { id }
    }

    pub fn mark_dirty(id: TabId, dirty: bool) -> Self {
        Command::MarkDirty { id, dirty }
    }

    pub fn select_panel(panel: PanelId) -> Self {
        Command::SelectPanel { panel }
    }

    pub fn set_tree_filter(query: impl Into<String>) -> Self {
        Command::SetTreeFilter {
            query: query.into(),
        }
    }

    pub fn toggle_folder(id: impl Into<String>) -> Self {
        Command::ToggleFolder {
            id: NodeId::new(id),
        }
    }

    pub fn submit_message(text: impl Into<String>) -> Self {
        Command::SubmitMessage { text: text.into() }
    }

    pub fn submit_command(text: impl Into<String>) -> Self {
        Command::SubmitCommand { text: text.into() }
    }

    pub fn select_model(model: impl Into<String>) -> Self {
        Command::SelectModel {
            model: model.into(),
        }
    }

    pub fn select_agent(agent: impl Into<String>) -> Self {
        Command::SelectAgent {
            agent: agent.into(),
        }
    }

    pub fn advance(ms: u64) -> Self {
        Command::Advance { ms }
    }
}

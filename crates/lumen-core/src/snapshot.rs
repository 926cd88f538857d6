//! Read-only projections of session state
//!
//! A snapshot is a plain value with no references back into the session.
//! The viewer, breadcrumb and status line are derived from it and nothing
//! here mutates anything.

use crate::log::{ConsoleKind, ConversationKind, LogEntry};
use crate::panels::{PanelId, SideView};
use crate::tabs::Tab;
use crate::tree::FileRow;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Path shown in the viewer
    pub selected_path: Option<String>,

    pub tabs: Vec<Tab>,

    pub active_panel: PanelId,
    pub side_view: SideView,

    pub conversation: Vec<LogEntry<ConversationKind>>,
    pub console: Vec<LogEntry<ConsoleKind>>,

    /// Tree filter as typed
    pub filter: String,

    /// Flattened visible tree
    pub tree: Vec<FileRow>,

    /// Selected model and agent
    pub model: String,
    pub agent: String,

    /// Virtual session time in milliseconds
    pub now_ms: u64,
}

impl SessionSnapshot {
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.is_active)
    }

    pub fn dirty_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.is_dirty).count()
    }

    /// Time since the newest entry in either log
    pub fn idle_for(&self) -> Option<Duration> {
        let newest = self
            .conversation
            .iter()
            .map(|e| e.timestamp_ms)
            .chain(self.console.iter().map(|e| e.timestamp_ms))
            .max()?;
        Some(Duration::from_millis(self.now_ms.saturating_sub(newest)))
    }
}

/// What the content viewer shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewerState {
    /// No tab is active
    Empty,

    Document {
        path: String,
        name: String,

        /// Display label from the file classifier
        language: String,

        /// Tokenizer tag from the resolver, if it knew the file
        syntax: Option<String>,

        /// `None` when the resolver has no content for the path
        content: Option<String>,

        is_dirty: bool,
    },
}

impl ViewerState {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewerState::Empty)
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            ViewerState::Empty => None,
            ViewerState::Document { path, .. } => Some(path),
        }
    }

    /// Byte length of the document text, if any
    pub fn byte_len(&self) -> Option<u64> {
        match self {
            ViewerState::Document {
                content: Some(text),
                ..
            } => u64::try_from(text.len()).ok(),
            _ => None,
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            ViewerState::Document {
                content: Some(text),
                ..
            } => text.lines().count(),
            _ => 0,
        }
    }
}

/// Non-empty segments of a path, root first
pub fn breadcrumb(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Summary shown along the bottom edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub file: Option<String>,
    pub language: Option<String>,
    pub lines: usize,

    /// Document size, e.g. "1.5 KB"
    pub size: Option<String>,

    pub dirty_tabs: usize,
    pub panel: &'static str,
    pub model: String,

    /// Age of the latest log activity, e.g. "3m ago"
    pub activity: Option<String>,
}

impl StatusLine {
    pub fn new(snapshot: &SessionSnapshot, viewer: &ViewerState) -> Self {
        let (file, language) = match viewer {
            ViewerState::Empty => (None, None),
            ViewerState::Document { name, language, .. } => {
                (Some(name.clone()), Some(language.clone()))
            }
        };
        Self {
            file,
            language,
            lines: viewer.line_count(),
            size: viewer.byte_len().map(format_size),
            dirty_tabs: snapshot.dirty_count(),
            panel: snapshot.active_panel.label(),
            model: snapshot.model.clone(),
            activity: snapshot.idle_for().map(format_age),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, &self.language) {
            (Some(file), Some(language)) => {
                write!(f, "{} | {} | {} lines", file, language, self.lines)?
            }
            _ => write!(f, "No file open")?,
        }
        if let Some(size) = &self.size {
            write!(f, " | {}", size)?;
        }
        if self.dirty_tabs > 0 {
            write!(f, " | {} unsaved", self.dirty_tabs)?;
        }
        write!(f, " | {} | {}", self.panel, self.model)?;
        if let Some(activity) = &self.activity {
            write!(f, " | active {}", activity)?;
        }
        Ok(())
    }
}

/// Human-readable byte count with one decimal ("1.5 KB")
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Coarse relative age ("3m ago", "Just now")
pub fn format_age(elapsed: Duration) -> String {
    let minutes = elapsed.as_secs() / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "Just now".to_string()
    }
}

//! Lumen Core - workspace session model
//!
//! This crate provides the UI-agnostic state behind the Lumen workspace:
//! - File tree with expand/collapse and filtering
//! - Open tabs bound to tree paths
//! - Side panel routing
//! - Assistant and console logs with delayed follow-ups on a virtual clock
//! - Configuration loading
//!
//! Any frontend consumes this crate through the [`Session`] interface.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command     ┌──────────────────┐
//! │   Any frontend    │ ─────────────→│   lumen-core     │
//! │                   │               │   Session        │
//! │                   │ ←─────────────│                  │
//! └───────────────────┘  Notification └──────────────────┘
//! ```

// Public API modules
pub mod commands;
pub mod error;
pub mod notifications;
pub mod types;

pub mod config;

// Session state
pub mod log;
pub mod panels;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod tabs;
pub mod tree;

// Presentation collaborators
pub mod content;
pub mod demo;
pub mod highlight;
pub mod language;

pub use commands::Command;
pub use config::{load_config, sample_config, LumenConfig};
pub use content::{ContentResolver, Document, StaticContent};
pub use error::{LumenError, Result};
pub use highlight::{PlainTokenizer, StyledSpan, SyntectTokenizer, Tokenizer};
pub use language::{classify, FileClass};
pub use log::{ConsoleKind, ConversationKind, LogEntry};
pub use notifications::Notification;
pub use panels::{PanelId, SideView};
pub use session::Session;
pub use snapshot::{breadcrumb, format_age, format_size, SessionSnapshot, StatusLine, ViewerState};
pub use tabs::Tab;
pub use tree::{CatalogEntry, FileRow, FileTree, NodeKind};
pub use types::{Channel, EntryId, NodeId, TabId};

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Entry kinds for the two interaction logs

use crate::types::Channel;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Log-specific entry classification
pub trait LogKind: Copy + Eq + Debug + Serialize + Send + 'static {
    /// The log this kind belongs to
    const CHANNEL: Channel;

    /// Kind given to user-originated entries
    fn user() -> Self;

    fn is_user(&self) -> bool {
        *self == Self::user()
    }
}

/// Conversation entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    User,
    Assistant,
}

impl LogKind for ConversationKind {
    const CHANNEL: Channel = Channel::Conversation;

    fn user() -> Self {
        ConversationKind::User
    }
}

/// Console entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    Command,
    Output,
    Error,
    Success,
}

impl ConsoleKind {
    /// Line prefix a console view puts before the content
    pub fn prefix(&self) -> &'static str {
        match self {
            ConsoleKind::Command => "$ ",
            ConsoleKind::Error => "✗ ",
            ConsoleKind::Success => "✓ ",
            ConsoleKind::Output => "",
        }
    }
}

impl LogKind for ConsoleKind {
    const CHANNEL: Channel = Channel::Console;

    fn user() -> Self {
        ConsoleKind::Command
    }
}

//! Follow-up content hooks
//!
//! A responder decides what a follow-up entry says. It never decides when the
//! entry appears: timing belongs to the log and the scheduler. Swapping in a
//! model-inference or shell-execution backend means implementing this trait.

use super::kinds::{ConsoleKind, ConversationKind, LogKind};

/// Kind and text of a follow-up entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<K> {
    pub kind: K,
    pub content: String,
}

/// Produces follow-up content for one log
pub trait Responder<K: LogKind>: Send {
    /// Build the reply to a user submission
    fn respond(&self, prompt: &str) -> Reply<K>;
}

/// Answers every message with the same acknowledgement
#[derive(Debug, Clone)]
pub struct Acknowledge {
    message: String,
}

impl Acknowledge {
    pub const DEFAULT_MESSAGE: &'static str =
        "I understand your request. Let me analyze the code and provide suggestions.";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Acknowledge {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

impl Responder<ConversationKind> for Acknowledge {
    fn respond(&self, _prompt: &str) -> Reply<ConversationKind> {
        Reply {
            kind: ConversationKind::Assistant,
            content: self.message.clone(),
        }
    }
}

/// Reports a command as executing without running it
#[derive(Debug, Clone)]
pub struct Echo {
    prefix: String,
}

impl Echo {
    pub const DEFAULT_PREFIX: &'static str = "Executing: ";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for Echo {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl Responder<ConsoleKind> for Echo {
    fn respond(&self, command: &str) -> Reply<ConsoleKind> {
        Reply {
            kind: ConsoleKind::Output,
            content: format!("{}{}", self.prefix, command),
        }
    }
}

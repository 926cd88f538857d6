//! Notifications that a Lumen session sends to any frontend
//!
//! These report state changes. They are serializable so a frontend can
//! consume them as JSON.

use crate::snapshot::SessionSnapshot;
use crate::types::{Channel, EntryId};
use serde::Serialize;

/// Notifications that the session sends to a frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// State changed; the snapshot is complete
    SnapshotChanged { snapshot: Box<SessionSnapshot> },

    /// A follow-up entry was appended to a log
    EntryAppended {
        channel: Channel,
        id: EntryId,

        /// Entry text as appended
        content: String,
    },

    /// A user action was refused
    InputRejected {
        channel: Option<Channel>,
        reason: String,
    },

    /// The session is closing; nothing further will be sent
    ShuttingDown {
        /// Follow-ups dropped by the shutdown
        cancelled: usize,
    },
}

impl Notification {
    pub fn snapshot_changed(snapshot: SessionSnapshot) -> Self {
        Notification::SnapshotChanged {
            snapshot: Box::new(snapshot),
        }
    }

    pub fn input_rejected(channel: Option<Channel>, reason: impl Into<String>) -> Self {
        Notification::InputRejected {
            channel,
            reason: reason.into(),
        }
    }
}

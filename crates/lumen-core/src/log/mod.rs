//! Append-only interaction logs
//!
//! Two instances exist per session: the assistant conversation and the
//! command console. A submission appends the user's entry at once and posts
//! one follow-up message to the scheduler. When that message comes due the
//! owner hands it back through [`InteractionLog::deliver`], and the reply is
//! appended after whatever was appended in the meantime.
//!
//! ```text
//! submit("hi") ──► entries += User("hi")
//!              └─► scheduler.schedule(delay, FollowUp)
//!                          │
//!            advance(..) ──┘──► deliver(FollowUp) ──► entries += reply
//! ```

mod kinds;
mod responder;

pub use kinds::{ConsoleKind, ConversationKind, LogKind};
pub use responder::{Acknowledge, Echo, Reply, Responder};

use crate::error::{LumenError, Result};
use crate::scheduler::{millis, Scheduler};
use crate::types::{Channel, EntryId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default follow-up latency of the conversation log
pub const CONVERSATION_DELAY: Duration = Duration::from_millis(1000);

/// Default follow-up latency of the console log
pub const CONSOLE_DELAY: Duration = Duration::from_millis(100);

/// One entry of an interaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry<K> {
    pub id: EntryId,
    pub kind: K,
    pub content: String,

    /// Session time the entry was appended, in milliseconds
    pub timestamp_ms: u64,

    /// Who produced a non-user entry, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// Message posted to the scheduler for a pending follow-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    /// Log the reply belongs to
    pub channel: Channel,

    /// The submitted text the reply answers
    pub prompt: String,
}

pub type ConversationLog = InteractionLog<ConversationKind>;
pub type ConsoleLog = InteractionLog<ConsoleKind>;

/// Append-only ordered list of entries with delayed follow-ups
pub struct InteractionLog<K: LogKind> {
    entries: Vec<LogEntry<K>>,
    next_id: u64,
    delay: Duration,
    agent: Option<String>,
    responder: Box<dyn Responder<K>>,
}

impl<K: LogKind> std::fmt::Debug for InteractionLog<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionLog")
            .field("channel", &K::CHANNEL)
            .field("entries", &self.entries.len())
            .field("delay", &self.delay)
            .field("agent", &self.agent)
            .finish()
    }
}

impl ConversationLog {
    /// Conversation log with the default acknowledgement and latency
    pub fn conversation() -> Self {
        Self::new(CONVERSATION_DELAY, Acknowledge::default())
    }
}

impl ConsoleLog {
    /// Console log with the default echo and latency
    pub fn console() -> Self {
        Self::new(CONSOLE_DELAY, Echo::default())
    }
}

impl<K: LogKind> InteractionLog<K> {
    pub fn new(delay: Duration, responder: impl Responder<K> + 'static) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            delay,
            agent: None,
            responder: Box::new(responder),
        }
    }

    /// Attribute future follow-ups to `agent`
    pub fn set_agent(&mut self, agent: Option<String>) {
        self.agent = agent;
    }

    pub fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    pub fn channel(&self) -> Channel {
        K::CHANNEL
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn entries(&self) -> &[LogEntry<K>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry<K>> {
        self.entries.last()
    }

    /// Append a user entry now and post its follow-up
    ///
    /// Blank input is rejected and nothing is appended or posted. Earlier
    /// follow-ups still in flight have no effect on this call.
    pub fn submit(&mut self, content: &str, scheduler: &mut Scheduler<FollowUp>) -> Result<EntryId> {
        if content.trim().is_empty() {
            return Err(LumenError::empty_input(K::CHANNEL));
        }

        let id = self.push(K::user(), content.to_string(), None, scheduler.now());
        scheduler.schedule(
            self.delay,
            FollowUp {
                channel: K::CHANNEL,
                prompt: content.to_string(),
            },
        );
        let channel = K::CHANNEL;
        tracing::debug!(%channel, entry = %id, delay_ms = millis(self.delay), "follow-up posted");
        Ok(id)
    }

    /// Append the reply for a follow-up that came due at `at`
    ///
    /// Follow-ups addressed to the other log are ignored.
    pub fn deliver(&mut self, follow_up: &FollowUp, at: Duration) -> Option<&LogEntry<K>> {
        if follow_up.channel != K::CHANNEL {
            let expected = K::CHANNEL;
            tracing::debug!(%expected, got = %follow_up.channel, "follow-up for another log");
            return None;
        }
        let reply = self.responder.respond(&follow_up.prompt);
        let agent = if reply.kind.is_user() {
            None
        } else {
            self.agent.clone()
        };
        self.push(reply.kind, reply.content, agent, at);
        self.entries.last()
    }

    /// Append an entry as-is, without a follow-up
    ///
    /// Used to seed history when a session starts.
    pub fn record(
        &mut self,
        kind: K,
        content: impl Into<String>,
        agent: Option<String>,
        at: Duration,
    ) -> EntryId {
        self.push(kind, content.into(), agent, at)
    }

    fn push(&mut self, kind: K, content: String, agent: Option<String>, at: Duration) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(LogEntry {
            id,
            kind,
            content,
            timestamp_ms: millis(at),
            agent,
        });
        id
    }
}

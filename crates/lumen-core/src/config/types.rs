//! Configuration types for Lumen
//!
//! Defines the structure of `.lumen.toml` configuration.

use crate::error::{LumenError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for either follow-up delay, in milliseconds
pub const MAX_DELAY_MS: u64 = 60_000;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LumenConfig {
    /// Session timing and notification settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Assistant profile and reply text
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Console echo settings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Where the file catalog comes from
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Session configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Latency of the assistant follow-up
    #[serde(default = "default_conversation_delay_ms")]
    pub conversation_delay_ms: u64,

    /// Latency of the console follow-up
    #[serde(default = "default_console_delay_ms")]
    pub console_delay_ms: u64,

    /// Bounded notification channel size
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,

    /// Open the demo tabs and seed both logs at start
    #[serde(default = "default_true")]
    pub seed_demo_history: bool,
}

fn default_conversation_delay_ms() -> u64 {
    1000
}

fn default_console_delay_ms() -> u64 {
    100
}

fn default_notification_capacity() -> usize {
    256
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            conversation_delay_ms: default_conversation_delay_ms(),
            console_delay_ms: default_console_delay_ms(),
            notification_capacity: default_notification_capacity(),
            seed_demo_history: true,
        }
    }
}

impl SessionConfig {
    pub fn conversation_delay(&self) -> Duration {
        Duration::from_millis(self.conversation_delay_ms)
    }

    pub fn console_delay(&self) -> Duration {
        Duration::from_millis(self.console_delay_ms)
    }
}

/// Assistant configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model shown as selected at start
    #[serde(default = "default_model")]
    pub model: String,

    /// Models the user may pick from
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Agent replies are attributed to at start
    #[serde(default = "default_agent")]
    pub agent: String,

    /// Agents the user may pick from
    #[serde(default = "default_agents")]
    pub agents: Vec<String>,

    /// Text of every assistant follow-up
    #[serde(default = "default_reply")]
    pub reply: String,
}

fn default_model() -> String {
    "Claude 3.5 Sonnet".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "Claude 3.5 Sonnet".to_string(),
        "GPT-4".to_string(),
        "GPT-3.5 Turbo".to_string(),
    ]
}

fn default_agent() -> String {
    "Builder".to_string()
}

fn default_agents() -> Vec<String> {
    vec!["Builder".to_string(), "Validator".to_string()]
}

fn default_reply() -> String {
    crate::log::Acknowledge::DEFAULT_MESSAGE.to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            models: default_models(),
            agent: default_agent(),
            agents: default_agents(),
            reply: default_reply(),
        }
    }
}

/// Console configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_echo_prefix")]
    pub echo_prefix: String,
}

fn default_echo_prefix() -> String {
    crate::log::Echo::DEFAULT_PREFIX.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            echo_prefix: default_echo_prefix(),
        }
    }
}

/// Workspace configuration section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// JSON or TOML catalog file (supports ${ENV_VAR} syntax)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl LumenConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        let session = &self.session;
        if session.conversation_delay_ms > MAX_DELAY_MS {
            return Err(LumenError::config(format!(
                "conversation_delay_ms {} exceeds {}",
                session.conversation_delay_ms, MAX_DELAY_MS
            )));
        }
        if session.console_delay_ms > MAX_DELAY_MS {
            return Err(LumenError::config(format!(
                "console_delay_ms {} exceeds {}",
                session.console_delay_ms, MAX_DELAY_MS
            )));
        }
        if session.notification_capacity == 0 {
            return Err(LumenError::config("notification_capacity must be positive"));
        }

        let assistant = &self.assistant;
        if !assistant.models.contains(&assistant.model) {
            return Err(LumenError::config(format!(
                "model '{}' is not in the models list",
                assistant.model
            )));
        }
        if !assistant.agents.contains(&assistant.agent) {
            return Err(LumenError::config(format!(
                "agent '{}' is not in the agents list",
                assistant.agent
            )));
        }
        Ok(())
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

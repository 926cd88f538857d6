//! Configuration module for Lumen
//!
//! Handles loading and parsing of `.lumen.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{
    load_config, load_from_file, parse_config, sample_config, user_config_path,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    AssistantConfig, ConsoleConfig, LumenConfig, SessionConfig, WorkspaceConfig, MAX_DELAY_MS,
};

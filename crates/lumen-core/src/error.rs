//! Error types for Lumen Core
//!
//! Stale references (unknown tab ids, node ids, paths) are not errors: the
//! session ignores them. Everything a caller has to decide about lands here.

use crate::types::Channel;
use thiserror::Error;

/// Result type for Lumen Core operations
pub type Result<T> = std::result::Result<T, LumenError>;

/// Unified error type for Lumen Core
#[derive(Error, Debug)]
pub enum LumenError {
    /// A submission was blank after trimming
    #[error("Empty input for {channel}")]
    EmptyInput { channel: Channel },

    /// Catalog failed validation
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation after the session was shut down
    #[error("Session is closed")]
    SessionClosed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LumenError {
    /// Create an empty input error
    pub fn empty_input(channel: Channel) -> Self {
        LumenError::EmptyInput { channel }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        LumenError::InvalidCatalog(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        LumenError::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LumenError::Config(msg.into())
    }

    /// Whether this error came from user input and should be shown, not logged
    pub fn is_user_input(&self) -> bool {
        matches!(self, LumenError::EmptyInput { .. })
    }
}

impl From<toml::de::Error> for LumenError {
    fn from(err: toml::de::Error) -> Self {
        LumenError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LumenError {
    fn from(err: toml::ser::Error) -> Self {
        LumenError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = LumenError::empty_input(Channel::Console);
        assert_eq!(err.to_string(), "Empty input for console");
        assert!(err.is_user_input());
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: LumenError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, LumenError::Config(_)));
        assert!(!err.is_user_input());
    }
}

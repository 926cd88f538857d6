//! Error types for the lumen frontend using thiserror
//!
//! All errors are typed - no .unwrap() or .expect() in production code.

use lumen_core::LumenError;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] LumenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input thread failed to start: {0}")]
    InputThread(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

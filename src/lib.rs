//! Lumen - line-oriented frontend for the workspace session
//!
//! Reads one action per line, drives a [`lumen_core::Session`] on the wall
//! clock, and prints text (or JSON) projections of its state.

pub mod app;
pub mod error;
pub mod logging;
pub mod render;
pub mod repl;

pub use app::{App, Flow, Options};
pub use error::{AppError, Result};

//! Error types for pytower operations.
//!
//! This module defines [`PytowerError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PytowerError` for failures that need distinct handling (a child
//!   process that could not be launched, a child killed for overrunning its
//!   time budget)
//! - Use `anyhow::Error` (via `PytowerError::Other`) for boundary errors
//!   such as HTTP and JSON failures
//! - A probe that runs but produces no usable version is *not* an error;
//!   that outcome is carried as data inside the interpreter record

use thiserror::Error;

/// Core error type for pytower operations.
#[derive(Debug, Error)]
pub enum PytowerError {
    /// An external command could not be started.
    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command overran its time budget and was killed.
    #[error("Command timed out after {secs}s: {command}")]
    Timeout { command: String, secs: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pytower operations.
pub type Result<T> = std::result::Result<T, PytowerError>;

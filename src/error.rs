//! Error handling module for pkgfront
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Per-package check failures are not errors at this level: they are folded into
//! the check buckets. Only conditions that stop a run surface here.

use thiserror::Error;

/// Main error type for pkgfront
#[derive(Error, Debug)]
pub enum PkgFrontError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Interface or package list document missing, malformed or schema-invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Operator cancelled the run (SIGINT, SIGTERM, SIGHUP)
    #[error("Interrupted by operator")]
    Interrupted,

    /// The batched install/remove command could not be run or failed
    #[error("Execution error: {0}")]
    Execution(String),

    /// The confirmation prompt could not read an answer
    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Result type alias for pkgfront operations
pub type Result<T> = std::result::Result<T, PkgFrontError>;

impl PkgFrontError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Whether this error is the operator's interrupt
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }

    /// Process exit code the binary reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // 128 + SIGINT, the shell convention
            Self::Interrupted => 130,
            Self::Config(_) | Self::Json(_) => 2,
            _ => 1,
        }
    }
}

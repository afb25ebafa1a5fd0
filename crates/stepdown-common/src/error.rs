//! Unified error types for the Stepdown workspace.
//!
//! Startup failures before the privilege drop are fatal by policy, so
//! every fallible operation surfaces one of these variants and lets the
//! binary abort with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StepdownError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A permission or identity-switch error.
    #[error("permission denied: {message}")]
    PermissionDenied {
        /// Description of the denied operation.
        message: String,
    },

    /// Executing or replacing the process image failed.
    #[error("exec of {command} failed: {message}")]
    Exec {
        /// Command that failed to execute.
        command: String,
        /// Description of the failure.
        message: String,
    },

    /// Deserializing a recipe failed.
    #[error("recipe error: {source}")]
    Recipe {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StepdownError>;

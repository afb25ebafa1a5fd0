//! Configuration model for the container entrypoint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::OctalMode;

/// Settings for a single entrypoint invocation.
///
/// Populated from CLI flags and their environment-variable fallbacks;
/// the defaults match the image layout the renderer produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Service account the command runs as.
    pub user: String,
    /// Group override; `None` uses the account's primary group.
    pub group: Option<String>,
    /// Log directory to normalize before the privilege drop.
    pub log_dir: PathBuf,
    /// Permission mode applied to the log directory.
    pub log_dir_mode: OctalMode,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            user: crate::constants::SERVICE_USER.to_string(),
            group: None,
            log_dir: PathBuf::from(crate::constants::DEFAULT_LOG_DIR),
            log_dir_mode: OctalMode::LOG_DIR_DEFAULT,
        }
    }
}

//! Container startup sequence.
//!
//! Runs as root, fixes ownership on the mounted log directory, then
//! permanently becomes the service account and execs the application
//! server. Every step except the log directory pass is fail-fast: a
//! broken image must not serve traffic as the wrong user.

use std::convert::Infallible;

use stepdown_common::config::EntryConfig;
use stepdown_common::error::{Result, StepdownError};

use crate::{account, exec, logdir, privilege};

/// Runs the full startup sequence and replaces the current process.
///
/// Steps, in order: resolve the service account, resolve the target
/// command, normalize the log directory (failures tolerated), drop
/// privileges, exec. On success this function does not return.
///
/// # Errors
///
/// Returns an error if the account or command cannot be resolved, the
/// privilege drop fails, or the final exec fails.
pub fn run(config: &EntryConfig, command: &[String]) -> Result<Infallible> {
    let program = command.first().ok_or_else(|| StepdownError::Config {
        message: "no command to exec".into(),
    })?;

    let service = account::resolve(&config.user, config.group.as_deref())?;
    let program = exec::resolve(program)?;

    let _ = logdir::normalize(&config.log_dir, &service, config.log_dir_mode);

    privilege::drop_to(&service)?;
    exec::replace(&program, command)
}

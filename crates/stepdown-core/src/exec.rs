//! Process replacement and supervised execution.
//!
//! The entrypoint ends in one of two ways: `replace` substitutes the
//! current process image via `execv`, keeping the same PID; `spawn_as`
//! runs the command as a child under the service account and mirrors
//! its exit status, for callers that must keep running afterwards.

use std::path::{Path, PathBuf};

use stepdown_common::error::{Result, StepdownError};
use stepdown_common::types::ServiceAccount;

/// Resolves the target command to an executable path.
///
/// A command containing a path separator must exist as a file; a bare
/// name is looked up on `PATH`. Resolution happens before any privilege
/// change so a broken image aborts instead of serving.
///
/// # Errors
///
/// Returns `NotFound` if the command cannot be resolved, or `Config`
/// if it is empty.
pub fn resolve(command: &str) -> Result<PathBuf> {
    if command.is_empty() {
        return Err(StepdownError::Config {
            message: "exec command is empty".into(),
        });
    }
    if command.contains('/') {
        let path = PathBuf::from(command);
        if path.is_file() {
            return Ok(path);
        }
        return Err(StepdownError::NotFound {
            kind: "command",
            id: command.to_string(),
        });
    }
    which::which(command).map_err(|_| StepdownError::NotFound {
        kind: "command",
        id: command.to_string(),
    })
}

/// Replaces the current process image with `program`.
///
/// The environment and open file descriptors are inherited. On success
/// this function does not return; the application now owns the PID.
///
/// # Errors
///
/// Returns `Config` if the argument vector is empty or contains a NUL
/// byte, or `Exec` if the `execv` call itself fails.
#[cfg(unix)]
pub fn replace(program: &Path, argv: &[String]) -> Result<std::convert::Infallible> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    use nix::unistd::execv;

    if argv.is_empty() {
        return Err(StepdownError::Config {
            message: "exec command is empty".into(),
        });
    }

    let program_c =
        CString::new(program.as_os_str().as_bytes()).map_err(|_| StepdownError::Config {
            message: "command path contains a NUL byte".into(),
        })?;
    let argv_c: Vec<CString> = argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| StepdownError::Config {
            message: "command argument contains a NUL byte".into(),
        })?;

    tracing::info!(program = %program.display(), "replacing process image");
    execv(&program_c, &argv_c).map_err(|errno| StepdownError::Exec {
        command: program.display().to_string(),
        message: errno.to_string(),
    })
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error; process replacement requires Unix.
#[cfg(not(unix))]
pub fn replace(_program: &Path, _argv: &[String]) -> Result<std::convert::Infallible> {
    Err(StepdownError::Config {
        message: "Unix required for process replacement".into(),
    })
}

/// Runs the command as a supervised child under the service account.
///
/// The child is spawned with the account's uid/gid, stdio inherited,
/// and its exit status is returned for propagation by the caller.
///
/// # Errors
///
/// Returns `Config` if the argument vector is empty, `NotFound` if the
/// command cannot be resolved, or `Exec` if spawning fails.
#[cfg(unix)]
pub fn spawn_as(account: &ServiceAccount, argv: &[String]) -> Result<i32> {
    use std::os::unix::process::CommandExt;

    let (program, args) = argv.split_first().ok_or_else(|| StepdownError::Config {
        message: "exec command is empty".into(),
    })?;
    let program = resolve(program)?;

    tracing::info!(program = %program.display(), user = %account.name, "spawning supervised child");
    let status = std::process::Command::new(&program)
        .args(args)
        .uid(account.uid)
        .gid(account.gid)
        .status()
        .map_err(|e| StepdownError::Exec {
            command: program.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(status.code().unwrap_or(-1))
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error; identity-switched spawning requires Unix.
#[cfg(not(unix))]
pub fn spawn_as(_account: &ServiceAccount, _argv: &[String]) -> Result<i32> {
    Err(StepdownError::Config {
        message: "Unix required for privilege operations".into(),
    })
}

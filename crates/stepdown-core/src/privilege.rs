//! Permanent identity switch to the service account.
//!
//! Order matters: supplementary groups first, then the primary group,
//! then the user. Once the UID changes, none of the group calls are
//! permitted anymore.

use stepdown_common::error::{Result, StepdownError};
use stepdown_common::types::ServiceAccount;

/// Drops the current process's identity to the service account.
///
/// Refuses uid 0 targets outright. When the effective UID already
/// matches the account, the call is a no-op. After the switch, a probe
/// verifies the drop cannot be reverted.
///
/// # Errors
///
/// Returns `PermissionDenied` if the target is root, if any of the
/// identity syscalls fails, or if the process can still regain root
/// afterwards.
#[cfg(target_os = "linux")]
pub fn drop_to(account: &ServiceAccount) -> Result<()> {
    use nix::unistd::{self, Gid, Uid};

    if account.is_root() {
        return Err(StepdownError::PermissionDenied {
            message: "refusing to run the application as root".into(),
        });
    }

    let uid = Uid::from_raw(account.uid);
    let gid = Gid::from_raw(account.gid);

    if unistd::geteuid() == uid {
        tracing::debug!(user = %account.name, "already running as the service account");
        return Ok(());
    }

    unistd::setgroups(&[gid]).map_err(|e| denied(format!("setgroups failed: {e}")))?;
    unistd::setgid(gid).map_err(|e| denied(format!("setgid to {gid} failed: {e}")))?;
    unistd::setuid(uid).map_err(|e| denied(format!("setuid to {uid} failed: {e}")))?;

    // The switch must be permanent.
    if unistd::setuid(Uid::from_raw(0)).is_ok() {
        return Err(denied("privilege drop did not stick".into()));
    }

    tracing::info!(user = %account.name, uid = account.uid, gid = account.gid, "dropped privileges");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error; the identity switch requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn drop_to(_account: &ServiceAccount) -> Result<()> {
    Err(StepdownError::Config {
        message: "Linux required for privilege operations".into(),
    })
}

#[cfg(target_os = "linux")]
fn denied(message: String) -> StepdownError {
    StepdownError::PermissionDenied { message }
}

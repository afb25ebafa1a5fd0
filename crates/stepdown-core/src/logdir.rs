//! Log directory normalization at container start.
//!
//! A volume mounted over the log directory arrives with host ownership,
//! so the entrypoint re-owns the tree for the service account while it
//! still runs as root. Failures here are tolerated: a read-only mount
//! must not prevent the application from starting.

use std::path::Path;

use stepdown_common::types::{OctalMode, ServiceAccount};

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Entries whose ownership and mode were set.
    pub fixed: usize,
    /// Entries that could not be changed.
    pub failed: usize,
}

impl NormalizeReport {
    /// Returns `true` if every visited entry was normalized.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Recursively re-owns `dir` for the service account and applies `mode`.
///
/// A missing directory is skipped and reported as zero work. Individual
/// chown/chmod failures are counted and logged but never abort the pass.
#[cfg(unix)]
pub fn normalize(dir: &Path, account: &ServiceAccount, mode: OctalMode) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "log directory absent, skipping normalization");
        return report;
    }

    visit(dir, account, mode, &mut report);

    if report.is_clean() {
        tracing::debug!(dir = %dir.display(), fixed = report.fixed, "log directory normalized");
    } else {
        tracing::warn!(
            dir = %dir.display(),
            fixed = report.fixed,
            failed = report.failed,
            "log directory only partially normalized"
        );
    }
    report
}

#[cfg(unix)]
fn visit(path: &Path, account: &ServiceAccount, mode: OctalMode, report: &mut NormalizeReport) {
    if apply(path, account, mode) {
        report.fixed += 1;
    } else {
        report.failed += 1;
    }

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "cannot list directory, tolerated");
            report.failed += 1;
            return;
        }
    };

    for entry in entries.flatten() {
        let child = entry.path();
        // Do not follow symlinked directories out of the log tree.
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            visit(&child, account, mode, report);
        } else if apply(&child, account, mode) {
            report.fixed += 1;
        } else {
            report.failed += 1;
        }
    }
}

#[cfg(unix)]
fn apply(path: &Path, account: &ServiceAccount, mode: OctalMode) -> bool {
    use std::os::unix::fs::PermissionsExt;

    use nix::unistd::{Gid, Uid, chown};

    if let Err(err) = chown(
        path,
        Some(Uid::from_raw(account.uid)),
        Some(Gid::from_raw(account.gid)),
    ) {
        tracing::debug!(path = %path.display(), error = %err, "chown failed, tolerated");
        return false;
    }
    if let Err(err) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode.bits())) {
        tracing::debug!(path = %path.display(), error = %err, "chmod failed, tolerated");
        return false;
    }
    true
}

/// Stub for non-Unix platforms: reports zero work.
#[cfg(not(unix))]
pub fn normalize(dir: &Path, _account: &ServiceAccount, _mode: OctalMode) -> NormalizeReport {
    tracing::debug!(dir = %dir.display(), "ownership normalization unsupported on this platform");
    NormalizeReport::default()
}

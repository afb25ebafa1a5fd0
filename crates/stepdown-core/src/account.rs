//! Service account resolution.
//!
//! Looks up the non-root account the application process must run as.
//! A missing account means the image was built wrong, so lookup failures
//! abort startup instead of falling back to root.

use stepdown_common::error::{Result, StepdownError};
use stepdown_common::types::ServiceAccount;

/// Resolves a service account from the system user database.
///
/// When `group` is given, the account's primary group is overridden by
/// the named group; otherwise the group recorded in the user database
/// is used.
///
/// # Errors
///
/// Returns `NotFound` if the user or group does not exist, or `Config`
/// if the user database itself cannot be queried.
#[cfg(unix)]
pub fn resolve(user: &str, group: Option<&str>) -> Result<ServiceAccount> {
    use nix::unistd::{Group, User};

    let entry = User::from_name(user)
        .map_err(|e| StepdownError::Config {
            message: format!("user database lookup failed for \"{user}\": {e}"),
        })?
        .ok_or_else(|| StepdownError::NotFound {
            kind: "user",
            id: user.to_string(),
        })?;

    let gid = match group {
        Some(name) => {
            Group::from_name(name)
                .map_err(|e| StepdownError::Config {
                    message: format!("group database lookup failed for \"{name}\": {e}"),
                })?
                .ok_or_else(|| StepdownError::NotFound {
                    kind: "group",
                    id: name.to_string(),
                })?
                .gid
        }
        None => entry.gid,
    };

    let account = ServiceAccount {
        name: entry.name,
        uid: entry.uid.as_raw(),
        gid: gid.as_raw(),
        home: entry.dir,
    };
    tracing::debug!(user = %account.name, uid = account.uid, gid = account.gid, "resolved service account");
    Ok(account)
}

/// Stub for non-Unix platforms.
///
/// # Errors
///
/// Always returns an error; account resolution requires a Unix user
/// database.
#[cfg(not(unix))]
pub fn resolve(_user: &str, _group: Option<&str>) -> Result<ServiceAccount> {
    Err(StepdownError::Config {
        message: "Unix required for privilege operations".into(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn resolve_root_account() {
        let account = resolve("root", None).expect("root should exist");
        assert_eq!(account.uid, 0);
        assert!(account.is_root());
    }

    #[test]
    fn resolve_unknown_user_fails() {
        let err = resolve("no-such-user-acbd1234", None).expect_err("should fail");
        assert!(matches!(err, StepdownError::NotFound { kind: "user", .. }));
    }

    #[test]
    fn resolve_unknown_group_fails() {
        let err = resolve("root", Some("no-such-group-acbd1234")).expect_err("should fail");
        assert!(matches!(err, StepdownError::NotFound { kind: "group", .. }));
    }

    #[test]
    fn resolve_group_override_changes_gid() {
        // The root group exists on every Linux system with gid 0.
        let account = resolve("root", Some("root")).expect("root:root should resolve");
        assert_eq!(account.gid, 0);
    }
}

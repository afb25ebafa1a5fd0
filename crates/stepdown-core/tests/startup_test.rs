//! End-to-end tests for the container startup sequence.
//!
//! These exercise the pieces of the privilege-drop pipeline observable
//! from a test process:
//! 1. Service account resolution
//! 2. Log directory normalization (tolerant pass)
//! 3. Fail-fast ordering of `entrypoint::run`
//! 4. Supervised execution with exit-status propagation

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use stepdown_common::config::EntryConfig;
use stepdown_common::error::StepdownError;
use stepdown_common::types::{OctalMode, ServiceAccount};
use stepdown_core::{account, entrypoint, exec, logdir};

fn current_account() -> ServiceAccount {
    let user = nix::unistd::User::from_uid(nix::unistd::geteuid())
        .expect("user database should be readable")
        .expect("current user should exist");
    ServiceAccount {
        name: user.name,
        uid: user.uid.as_raw(),
        gid: nix::unistd::getegid().as_raw(),
        home: user.dir,
    }
}

// ── Account resolution ───────────────────────────────────────────────

#[test]
fn pipeline_resolves_current_user_by_name() {
    let expected = current_account();
    let resolved = account::resolve(&expected.name, None).expect("current user should resolve");
    assert_eq!(resolved.uid, expected.uid);
    assert_eq!(resolved.name, expected.name);
}

// ── Log directory normalization ──────────────────────────────────────

#[test]
fn pipeline_normalize_then_write_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let logs = dir.path().join("logs");
    std::fs::create_dir(&logs).expect("mkdir");

    let service = current_account();
    let report = logdir::normalize(&logs, &service, OctalMode::LOG_DIR_DEFAULT);
    assert!(report.is_clean());

    let log_file = logs.join("app.log");
    let argv = vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("echo started > {}", log_file.display()),
    ];
    let code = exec::spawn_as(&service, &argv).expect("child should run");
    assert_eq!(code, 0);
    assert!(log_file.exists());
}

#[test]
fn pipeline_missing_log_directory_is_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = current_account();
    let report = logdir::normalize(
        &dir.path().join("never-created"),
        &service,
        OctalMode::LOG_DIR_DEFAULT,
    );
    assert_eq!(report.fixed, 0);
    assert!(report.is_clean());
}

// ── Fail-fast ordering ───────────────────────────────────────────────

#[test]
fn pipeline_run_rejects_empty_command() {
    let config = EntryConfig::default();
    let err = entrypoint::run(&config, &[]).expect_err("empty command must abort");
    assert!(matches!(err, StepdownError::Config { .. }));
}

#[test]
fn pipeline_run_aborts_on_unknown_account() {
    let config = EntryConfig {
        user: "no-such-user-acbd1234".into(),
        ..EntryConfig::default()
    };
    let command = vec!["true".to_string()];
    let err = entrypoint::run(&config, &command).expect_err("unknown account must abort");
    assert!(matches!(err, StepdownError::NotFound { kind: "user", .. }));
}

#[test]
fn pipeline_run_aborts_on_missing_command_before_exec() {
    let service = current_account();
    let config = EntryConfig {
        user: service.name,
        log_dir: PathBuf::from("/nonexistent/logs"),
        ..EntryConfig::default()
    };
    let command = vec!["no-such-binary-acbd1234".to_string()];
    let err = entrypoint::run(&config, &command).expect_err("missing command must abort");
    assert!(matches!(err, StepdownError::NotFound { kind: "command", .. }));
}

// ── Exit-status propagation ──────────────────────────────────────────

#[test]
fn pipeline_supervised_child_runs_as_account() {
    let service = current_account();
    let argv = vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("test \"$(id -u)\" = \"{}\"", service.uid),
    ];
    let code = exec::spawn_as(&service, &argv).expect("child should run");
    assert_eq!(code, 0);
}

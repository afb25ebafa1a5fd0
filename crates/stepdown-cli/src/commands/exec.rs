//! `stepdown exec` — drop privileges and run the application command.

use std::path::PathBuf;

use clap::Args;
use stepdown_common::config::EntryConfig;
use stepdown_common::constants;
use stepdown_common::types::OctalMode;

/// Arguments for the `exec` command.
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Service account to run the command as.
    #[arg(long, env = constants::ENV_USER, default_value = constants::SERVICE_USER)]
    pub user: String,

    /// Group to run under (defaults to the account's primary group).
    #[arg(long, env = constants::ENV_GROUP)]
    pub group: Option<String>,

    /// Log directory re-owned before the privilege drop.
    #[arg(long = "logs", env = constants::ENV_LOG_DIR, default_value = constants::DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Octal permission mode applied to the log directory.
    #[arg(long = "mode", env = constants::ENV_LOG_MODE, default_value = constants::LOG_DIR_MODE)]
    pub log_dir_mode: String,

    /// Run the command as a supervised child instead of replacing the
    /// process, and exit with the child's status.
    #[arg(long)]
    pub supervise: bool,

    /// Command to execute after the privilege drop.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub command: Vec<String>,
}

/// Executes the `exec` command.
///
/// Without `--supervise` this call only returns on failure; on success
/// the process image has been replaced by the application command.
///
/// # Errors
///
/// Returns an error if startup fails before the privilege drop, the
/// drop itself fails, or the final exec fails.
pub fn execute(args: ExecArgs) -> anyhow::Result<()> {
    let config = EntryConfig {
        user: args.user,
        group: args.group,
        log_dir: args.log_dir,
        log_dir_mode: OctalMode::from_octal(&args.log_dir_mode)?,
    };

    if args.supervise {
        return supervise(&config, &args.command);
    }

    match stepdown_core::entrypoint::run(&config, &args.command) {
        Ok(never) => match never {},
        Err(e) => Err(e.into()),
    }
}

fn supervise(config: &EntryConfig, command: &[String]) -> anyhow::Result<()> {
    let account = stepdown_core::account::resolve(&config.user, config.group.as_deref())?;
    let _ = stepdown_core::logdir::normalize(&config.log_dir, &account, config.log_dir_mode);
    let code = stepdown_core::exec::spawn_as(&account, command)?;
    tracing::debug!(code, "supervised child exited");
    std::process::exit(code)
}

//! CLI command definitions and dispatch.

pub mod check;
pub mod exec;
pub mod render;

use clap::{Parser, Subcommand};

/// Stepdown — privilege-dropping container entrypoint.
#[derive(Parser, Debug)]
#[command(name = "stepdown", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drop privileges and replace the process with the application command.
    Exec(exec::ExecArgs),
    /// Render the image descriptor from a recipe.
    Render(render::RenderArgs),
    /// Validate an image recipe and print its plan.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Exec(args) => exec::execute(args),
        Command::Render(args) => render::execute(args),
        Command::Check(args) => check::execute(args),
    }
}

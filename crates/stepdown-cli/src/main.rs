//! # stepdown — privilege-dropping container entrypoint
//!
//! Root-only setup at container start, a permanent identity switch to
//! the service account, then process replacement. Single binary for
//! running the application unprivileged and for rendering the image
//! descriptor that installs it.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}

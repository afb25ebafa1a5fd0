//! `stepdown check` — validate an image recipe and print its plan.

use std::path::PathBuf;

use clap::Args;
use stepdown_image::recipe::ImageRecipe;
use stepdown_image::{render, validator};

use crate::output::{BOLD, DIM, GREEN, RESET, short_digest};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the image recipe.
    #[arg(default_value = stepdown_common::constants::DEFAULT_RECIPE_FILE)]
    pub file: PathBuf,

    /// Emit the validated plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the recipe cannot be read or fails validation.
pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let recipe = ImageRecipe::from_path(&args.file)?;
    validator::validate(&recipe)?;
    let digest = render::digest(&recipe)?;

    if args.json {
        let plan = serde_json::json!({
            "name": recipe.name,
            "base": recipe.base,
            "account": recipe.account.name,
            "workdir": recipe.workdir,
            "port": recipe.expose,
            "packages": recipe.packages.len(),
            "digest": digest.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    eprintln!();
    eprintln!("  {GREEN}✓{RESET} {BOLD}{}{RESET} is valid", recipe.name);
    eprintln!();
    eprintln!("    base:     {}", recipe.base);
    eprintln!("    account:  {}", recipe.account.name);
    eprintln!("    workdir:  {}", recipe.workdir.display());
    eprintln!("    port:     {}", recipe.expose);
    eprintln!("    packages: {}", recipe.packages.len());
    eprintln!("    digest:   {DIM}{}{RESET}", short_digest(&digest));
    eprintln!();

    Ok(())
}

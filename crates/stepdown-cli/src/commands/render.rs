//! `stepdown render` — render the image descriptor from a recipe.

use std::path::PathBuf;

use clap::Args;
use stepdown_image::recipe::ImageRecipe;
use stepdown_image::render;

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the image recipe.
    #[arg(default_value = stepdown_common::constants::DEFAULT_RECIPE_FILE)]
    pub file: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if the recipe cannot be read, fails validation, or
/// the output cannot be written.
pub fn execute(args: RenderArgs) -> anyhow::Result<()> {
    let input = &args.file;
    tracing::info!(path = %input.display(), "rendering image recipe");

    if !input.exists() {
        anyhow::bail!(
            "recipe not found: {}\n\
             Create a recipe or specify a path: stepdown render <file>",
            input.display()
        );
    }

    let recipe = ImageRecipe::from_path(input)?;
    let rendered = render::dockerfile(&recipe)?;
    let digest = render::digest(&recipe)?;

    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &rendered)?;
        println!("Rendered {} -> {}", input.display(), out_path.display());
        println!("Digest: {digest}");
    } else {
        print!("{rendered}");
    }

    Ok(())
}

//! Static validation of an image recipe.
//!
//! Checks the invariants the entrypoint relies on before anything is
//! rendered: a non-root account, an unprivileged port, unique copy
//! destinations, and no secrets baked into the image environment.

use std::collections::HashSet;

use stepdown_common::constants;
use stepdown_common::error::{Result, StepdownError};

use crate::recipe::ImageRecipe;

/// Suffixes that mark an environment key as secret-bearing.
const SECRET_SUFFIXES: [&str; 4] = ["_KEY", "_SECRET", "_TOKEN", "_PASSWORD"];

/// Validates a recipe for semantic correctness.
///
/// # Checks performed
///
/// 1. Name and base image are non-empty.
/// 2. The service account is not root, by name or by fixed UID.
/// 3. Workdir and log directory are absolute paths.
/// 4. The exposed port can be bound without root.
/// 5. Copy steps have non-empty paths and unique destinations.
/// 6. No secret-looking environment value is baked into the image.
/// 7. The command and optional manifest are well formed.
///
/// # Errors
///
/// Returns an error if any semantic check fails.
pub fn validate(recipe: &ImageRecipe) -> Result<()> {
    tracing::info!(name = %recipe.name, "validating image recipe");
    check_identity(recipe)?;
    check_account(recipe)?;
    check_paths(recipe)?;
    check_port(recipe)?;
    check_copy_steps(recipe)?;
    check_env(recipe)?;
    check_command(recipe)?;
    Ok(())
}

fn check_identity(recipe: &ImageRecipe) -> Result<()> {
    if recipe.name.trim().is_empty() {
        return Err(config_err("recipe name is empty"));
    }
    if recipe.base.trim().is_empty() {
        return Err(config_err("base image is empty"));
    }
    Ok(())
}

fn check_account(recipe: &ImageRecipe) -> Result<()> {
    let account = &recipe.account;
    if account.name.trim().is_empty() {
        return Err(config_err("service account name is empty"));
    }
    if account.name == "root" || account.uid == Some(0) {
        return Err(StepdownError::PermissionDenied {
            message: format!(
                "service account \"{}\" is root; the application must run unprivileged",
                account.name
            ),
        });
    }
    Ok(())
}

fn check_paths(recipe: &ImageRecipe) -> Result<()> {
    if !recipe.workdir.is_absolute() {
        return Err(config_err(&format!(
            "workdir {} is not absolute",
            recipe.workdir.display()
        )));
    }
    if !recipe.log_dir.is_absolute() {
        return Err(config_err(&format!(
            "log directory {} is not absolute",
            recipe.log_dir.display()
        )));
    }
    if recipe.entry_source.trim().is_empty() {
        return Err(config_err("entry binary source is empty"));
    }
    if let Some(manifest) = &recipe.manifest {
        if manifest.file.trim().is_empty() || manifest.install.trim().is_empty() {
            return Err(config_err("manifest file and install command must be non-empty"));
        }
    }
    Ok(())
}

fn check_port(recipe: &ImageRecipe) -> Result<()> {
    if recipe.expose < constants::UNPRIVILEGED_PORT_MIN {
        return Err(config_err(&format!(
            "port {} requires root to bind; \"{}\" runs unprivileged",
            recipe.expose, recipe.account.name
        )));
    }
    Ok(())
}

fn check_copy_steps(recipe: &ImageRecipe) -> Result<()> {
    let mut seen = HashSet::new();
    for step in &recipe.copy {
        if step.src.trim().is_empty() || step.dst.trim().is_empty() {
            return Err(config_err("copy step has an empty source or destination"));
        }
        if !seen.insert(step.dst.as_str()) {
            return Err(config_err(&format!(
                "duplicate copy destination: \"{}\"",
                step.dst
            )));
        }
    }
    Ok(())
}

fn check_env(recipe: &ImageRecipe) -> Result<()> {
    for (key, value) in &recipe.env {
        let upper = key.to_ascii_uppercase();
        let secret = SECRET_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix));
        if secret && !value.trim().is_empty() {
            return Err(config_err(&format!(
                "environment value for \"{key}\" looks like a secret; supply it at runtime instead"
            )));
        }
    }
    Ok(())
}

fn check_command(recipe: &ImageRecipe) -> Result<()> {
    if recipe.command.is_empty() || recipe.command[0].trim().is_empty() {
        return Err(config_err("application command is empty"));
    }
    Ok(())
}

fn config_err(message: &str) -> StepdownError {
    StepdownError::Config {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageRecipe {
        ImageRecipe::from_yaml(
            r#"
name: app
base: python:3.12-slim
command: ["uvicorn", "app.main:app"]
"#,
        )
        .expect("sample recipe should parse")
    }

    #[test]
    fn valid_recipe_passes() {
        validate(&sample()).expect("sample should validate");
    }

    #[test]
    fn root_account_name_is_rejected() {
        let mut recipe = sample();
        recipe.account.name = "root".into();
        let err = validate(&recipe).expect_err("root must be rejected");
        assert!(matches!(err, StepdownError::PermissionDenied { .. }));
    }

    #[test]
    fn uid_zero_is_rejected() {
        let mut recipe = sample();
        recipe.account.uid = Some(0);
        assert!(validate(&recipe).is_err());
    }

    #[test]
    fn privileged_port_is_rejected() {
        let mut recipe = sample();
        recipe.expose = 80;
        let err = validate(&recipe).expect_err("port 80 must be rejected");
        assert!(matches!(err, StepdownError::Config { .. }));
    }

    #[test]
    fn relative_workdir_is_rejected() {
        let mut recipe = sample();
        recipe.workdir = "app".into();
        assert!(validate(&recipe).is_err());
    }

    #[test]
    fn duplicate_copy_destinations_are_rejected() {
        let mut recipe = sample();
        recipe.copy = vec![
            crate::recipe::CopyStep {
                src: "app".into(),
                dst: "/app/app".into(),
                owned: true,
            },
            crate::recipe::CopyStep {
                src: "other".into(),
                dst: "/app/app".into(),
                owned: true,
            },
        ];
        assert!(validate(&recipe).is_err());
    }

    #[test]
    fn baked_secret_env_is_rejected() {
        let mut recipe = sample();
        let _ = recipe
            .env
            .insert("MISTRAL_API_KEY".into(), "sk-123".into());
        let err = validate(&recipe).expect_err("baked secret must be rejected");
        assert!(matches!(err, StepdownError::Config { .. }));
    }

    #[test]
    fn empty_secret_env_placeholder_is_allowed() {
        let mut recipe = sample();
        let _ = recipe.env.insert("MISTRAL_API_KEY".into(), String::new());
        validate(&recipe).expect("empty placeholder should pass");
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut recipe = sample();
        recipe.command.clear();
        assert!(validate(&recipe).is_err());
    }
}

//! Deterministic rendering of the runtime image descriptor.
//!
//! The rendered text is a pure function of the recipe: packages are
//! sorted and deduplicated, the environment is emitted in key order,
//! and nothing time- or host-dependent appears in the output. The
//! digest of the rendering therefore identifies the build.

use sha2::{Digest, Sha256};

use stepdown_common::constants;
use stepdown_common::error::Result;
use stepdown_common::types::Sha256Hash;

use crate::recipe::ImageRecipe;
use crate::validator;

/// Renders the Dockerfile for a recipe.
///
/// The recipe is validated first; a recipe that fails validation
/// renders nothing.
///
/// # Errors
///
/// Returns an error if validation fails or the command cannot be
/// serialized into exec form.
pub fn dockerfile(recipe: &ImageRecipe) -> Result<String> {
    validator::validate(recipe)?;
    tracing::info!(name = %recipe.name, "rendering image descriptor");

    let account = recipe.account.name.as_str();
    let workdir = recipe.workdir.display();
    let log_dir = recipe.log_dir.display();
    let mut out = String::new();

    out.push_str("# Generated by stepdown render; edit the recipe, not this file.\n");
    out.push_str(&format!("FROM {}\n\n", recipe.base));

    let mut packages: Vec<&str> = recipe.packages.iter().map(String::as_str).collect();
    packages.sort_unstable();
    packages.dedup();
    if !packages.is_empty() {
        out.push_str(&format!(
            "RUN apt-get update \\\n    && apt-get install -y --no-install-recommends {} \\\n    && rm -rf /var/lib/apt/lists/*\n\n",
            packages.join(" ")
        ));
    }

    let uid_flag = recipe
        .account
        .uid
        .map_or_else(String::new, |uid| format!("--uid {uid} "));
    out.push_str(&format!(
        "RUN groupadd --system {account} \\\n    && useradd --system {uid_flag}--gid {account} --home-dir {workdir} --shell /usr/sbin/nologin {account}\n\n"
    ));

    out.push_str(&format!("WORKDIR {workdir}\n\n"));

    if let Some(manifest) = &recipe.manifest {
        out.push_str(&format!("COPY {} ./\n", manifest.file));
        out.push_str(&format!("RUN {}\n\n", manifest.install));
    }

    out.push_str(&format!(
        "COPY --chmod=755 {} {}\n\n",
        recipe.entry_source,
        constants::ENTRY_INSTALL_PATH
    ));

    for step in &recipe.copy {
        if step.owned {
            out.push_str(&format!(
                "COPY --chown={account}:{account} {} {}\n",
                step.src, step.dst
            ));
        } else {
            out.push_str(&format!("COPY {} {}\n", step.src, step.dst));
        }
    }
    if !recipe.copy.is_empty() {
        out.push('\n');
    }

    for (key, value) in &recipe.env {
        out.push_str(&format!("ENV {key}={value}\n"));
    }
    if !recipe.env.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!(
        "RUN mkdir -p {log_dir} && chown {account}:{account} {log_dir}\n\n"
    ));

    out.push_str(&format!("EXPOSE {}\n\n", recipe.expose));

    let entry = vec![
        constants::ENTRY_INSTALL_PATH.to_string(),
        "exec".to_string(),
        "--user".to_string(),
        account.to_string(),
        "--logs".to_string(),
        log_dir.to_string(),
        "--".to_string(),
    ];
    out.push_str(&format!("ENTRYPOINT {}\n", serde_json::to_string(&entry)?));
    out.push_str(&format!("CMD {}\n", serde_json::to_string(&recipe.command)?));

    Ok(out)
}

/// Computes the SHA-256 digest of the rendered descriptor.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn digest(recipe: &ImageRecipe) -> Result<Sha256Hash> {
    let rendered = dockerfile(recipe)?;
    let mut hasher = Sha256::new();
    hasher.update(rendered.as_bytes());
    let hex: String = hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    Sha256Hash::from_hex(hex)
}

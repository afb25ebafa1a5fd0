//! Image recipe model.
//!
//! The recipe is the single authoritative description of the runtime
//! image. Divergent hand-edited image descriptors are configuration
//! drift; anything the image needs must be expressed here and rendered.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stepdown_common::constants;
use stepdown_common::error::{Result, StepdownError};

/// A validated, renderable description of the runtime image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRecipe {
    /// Image name.
    pub name: String,
    /// Base image reference.
    pub base: String,
    /// OS packages installed into the image.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Service account created in the image.
    #[serde(default)]
    pub account: AccountSpec,
    /// Working directory for the application.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    /// Language dependency manifest, if any.
    #[serde(default)]
    pub manifest: Option<ManifestSpec>,
    /// Files copied from the build context into the image.
    #[serde(default)]
    pub copy: Vec<CopyStep>,
    /// Environment baked into the image, in key order.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Port the application server listens on.
    #[serde(default = "default_port")]
    pub expose: u16,
    /// Log directory pre-created and owned by the service account.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Build-context path of the entry binary.
    #[serde(default = "default_entry_source")]
    pub entry_source: String,
    /// Application command in exec form.
    pub command: Vec<String>,
}

/// The non-root account the application runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSpec {
    /// Account name.
    pub name: String,
    /// Fixed numeric UID; assigned by the base image when absent.
    #[serde(default)]
    pub uid: Option<u32>,
}

impl Default for AccountSpec {
    fn default() -> Self {
        Self {
            name: constants::SERVICE_USER.to_string(),
            uid: None,
        }
    }
}

/// A language dependency manifest and the command that installs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestSpec {
    /// Manifest file in the build context (e.g. `requirements.txt`).
    pub file: String,
    /// Install command run after the manifest is copied.
    pub install: String,
}

/// A file or directory copied into the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyStep {
    /// Source path in the build context.
    pub src: String,
    /// Destination path in the image.
    pub dst: String,
    /// Whether ownership is assigned to the service account at copy time.
    #[serde(default = "default_owned")]
    pub owned: bool,
}

impl ImageRecipe {
    /// Loads and parses a recipe from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading image recipe");
        let text = std::fs::read_to_string(path).map_err(|e| StepdownError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&text)
    }

    /// Parses a recipe from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid recipe; unknown
    /// fields are rejected.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

fn default_workdir() -> PathBuf {
    PathBuf::from(constants::APP_DIR)
}

fn default_port() -> u16 {
    constants::DEFAULT_APP_PORT
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_LOG_DIR)
}

fn default_entry_source() -> String {
    constants::BIN_NAME.to_string()
}

const fn default_owned() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name: app
base: python:3.12-slim
command: ["uvicorn", "app.main:app", "--host", "0.0.0.0", "--port", "8000"]
"#;

    #[test]
    fn minimal_recipe_gets_defaults() {
        let recipe = ImageRecipe::from_yaml(MINIMAL).expect("should parse");
        assert_eq!(recipe.account.name, "appuser");
        assert_eq!(recipe.workdir, PathBuf::from("/app"));
        assert_eq!(recipe.log_dir, PathBuf::from("/app/logs"));
        assert_eq!(recipe.expose, 8000);
        assert!(recipe.packages.is_empty());
        assert!(recipe.manifest.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = format!("{MINIMAL}\nextra_field: true\n");
        assert!(ImageRecipe::from_yaml(&text).is_err());
    }

    #[test]
    fn full_recipe_parses() {
        let text = r#"
name: app
base: python:3.12-slim
packages: [ca-certificates, curl]
account:
  name: appuser
  uid: 1001
workdir: /app
manifest:
  file: requirements.txt
  install: pip install --no-cache-dir -r requirements.txt
copy:
  - src: app
    dst: /app/app
  - src: static
    dst: /app/static
    owned: false
env:
  PYTHONUNBUFFERED: "1"
expose: 8000
command: ["uvicorn", "app.main:app"]
"#;
        let recipe = ImageRecipe::from_yaml(text).expect("should parse");
        assert_eq!(recipe.account.uid, Some(1001));
        assert_eq!(recipe.copy.len(), 2);
        assert!(recipe.copy[0].owned);
        assert!(!recipe.copy[1].owned);
        assert_eq!(
            recipe.manifest.as_ref().map(|m| m.file.as_str()),
            Some("requirements.txt")
        );
    }

    #[test]
    fn from_path_reads_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stepdown.yml");
        std::fs::write(&path, MINIMAL).expect("write");

        let recipe = ImageRecipe::from_path(&path).expect("should load");
        assert_eq!(recipe.name, "app");
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = ImageRecipe::from_path(Path::new("/no/such/recipe.yml"))
            .expect_err("missing file must fail");
        assert!(matches!(err, StepdownError::Io { .. }));
    }
}

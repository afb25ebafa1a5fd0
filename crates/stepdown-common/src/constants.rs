//! System-wide constants and default paths.

/// Working directory for the application inside the image.
pub const APP_DIR: &str = "/app";

/// Log directory normalized at container start.
pub const DEFAULT_LOG_DIR: &str = "/app/logs";

/// Name of the non-root service account created in the image.
pub const SERVICE_USER: &str = "appuser";

/// Octal permission mode applied to the log directory (rwxr-xr-x).
pub const LOG_DIR_MODE: &str = "755";

/// Port the application server listens on by default.
pub const DEFAULT_APP_PORT: u16 = 8000;

/// First port a non-root process may bind without extra capabilities.
pub const UNPRIVILEGED_PORT_MIN: u16 = 1024;

/// Install path of the entry binary inside the image.
pub const ENTRY_INSTALL_PATH: &str = "/usr/local/bin/stepdown";

/// Default recipe file name.
pub const DEFAULT_RECIPE_FILE: &str = "stepdown.yml";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Application name used in CLI output.
pub const APP_NAME: &str = "stepdown";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "stepdown";

/// Environment variable overriding the service account name.
pub const ENV_USER: &str = "STEPDOWN_USER";

/// Environment variable overriding the group the command runs under.
pub const ENV_GROUP: &str = "STEPDOWN_GROUP";

/// Environment variable overriding the log directory path.
pub const ENV_LOG_DIR: &str = "STEPDOWN_LOG_DIR";

/// Environment variable overriding the log directory mode.
pub const ENV_LOG_MODE: &str = "STEPDOWN_LOG_MODE";

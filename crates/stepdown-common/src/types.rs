//! Domain primitive types used across the Stepdown workspace.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StepdownError};

/// Resolved identity of the non-root account the application runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    /// Account name as recorded in the user database.
    pub name: String,
    /// Numeric user ID.
    pub uid: u32,
    /// Numeric primary group ID.
    pub gid: u32,
    /// Home directory recorded for the account.
    pub home: PathBuf,
}

impl ServiceAccount {
    /// Returns `true` if this account is the superuser.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.uid == 0
    }
}

impl fmt::Display for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (uid {}, gid {})", self.name, self.uid, self.gid)
    }
}

/// Filesystem permission mode parsed from octal text such as `"755"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OctalMode(u32);

impl OctalMode {
    /// Mode applied to the log directory by default (rwxr-xr-x).
    pub const LOG_DIR_DEFAULT: Self = Self(0o755);

    /// Parses a mode from octal text, with or without a `0o` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than four digits,
    /// or contains a non-octal digit.
    pub fn from_octal(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches("0o");
        if digits.is_empty() || digits.len() > 4 {
            return Err(StepdownError::Config {
                message: format!("invalid octal mode: \"{text}\""),
            });
        }
        u32::from_str_radix(digits, 8)
            .map(Self)
            .map_err(|_| StepdownError::Config {
                message: format!("invalid octal mode: \"{text}\""),
            })
    }

    /// Returns the raw mode bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OctalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

impl TryFrom<String> for OctalMode {
    type Error = StepdownError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_octal(&value)
    }
}

impl From<OctalMode> for String {
    fn from(mode: OctalMode) -> Self {
        mode.to_string()
    }
}

/// SHA-256 hash digest used for content verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Creates a hash from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid 64-character hex string.
    pub fn from_hex(hex: impl Into<String>) -> Result<Self> {
        let hex = hex.into();
        if hex.len() != crate::constants::SHA256_HEX_LENGTH
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(StepdownError::Config {
                message: format!("invalid SHA-256 hex string: {hex}"),
            });
        }
        Ok(Self(hex))
    }

    /// Returns the hex-encoded hash string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

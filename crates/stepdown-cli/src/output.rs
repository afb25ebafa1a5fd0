//! Formatted output helpers for CLI commands.

use stepdown_common::types::Sha256Hash;

/// Bold ANSI escape.
pub const BOLD: &str = "\x1b[1m";
/// Dim ANSI escape.
pub const DIM: &str = "\x1b[2m";
/// Green ANSI escape.
pub const GREEN: &str = "\x1b[32m";
/// Reset ANSI escape.
pub const RESET: &str = "\x1b[0m";

/// Abbreviates a digest to `sha256:` plus the first 12 hex characters.
#[must_use]
pub fn short_digest(hash: &Sha256Hash) -> String {
    format!("sha256:{}", &hash.as_hex()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_digest_keeps_twelve_hex_chars() {
        let hash = Sha256Hash::from_hex("ab".repeat(32)).expect("valid hex");
        let short = short_digest(&hash);
        assert_eq!(short, "sha256:abababababab");
    }
}

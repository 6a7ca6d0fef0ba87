//! Local credential shape checks shared by every service

use secrecy::{ExposeSecret, SecretString};

use crate::diagnostic::Failure;

/// Mask a secret for display as `abcd...wxyz`
///
/// Secrets too short to hide anything behind the ellipsis are fully masked.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Require a configured, non-blank secret
pub fn require<'a>(value: Option<&'a SecretString>, field: &str) -> Result<&'a str, Failure> {
    value
        .map(ExposeSecret::expose_secret)
        .filter(|secret| !secret.trim().is_empty())
        .ok_or_else(|| Failure::missing(field))
}

/// Require an exact character length
pub fn require_len(value: &str, field: &str, expected: usize) -> Result<(), Failure> {
    let actual = value.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(Failure::malformed(format!("{field} appears invalid (length: {actual})")))
    }
}

/// Require a fixed prefix
pub fn require_prefix(value: &str, field: &str, prefix: &str) -> Result<(), Failure> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(Failure::malformed(format!(
            "{field} appears invalid (should start with '{prefix}')"
        )))
    }
}

use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{LedgerError, Result};

/// Prefix every accepted API key starts with.
pub const KEY_PREFIX: &str = "sk-";

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sk-[A-Za-z0-9_-]+$").expect("key pattern is valid"));

/// Check that `raw` looks like an API key before it is stored.
pub fn validate(raw: &str) -> Result<()> {
    if !raw.starts_with(KEY_PREFIX) {
        return Err(LedgerError::Validation {
            reason: format!("key must start with '{KEY_PREFIX}'"),
        });
    }
    if !KEY_PATTERN.is_match(raw) {
        return Err(LedgerError::Validation {
            reason: "key contains whitespace, unsupported characters, or nothing after the prefix"
                .into(),
        });
    }
    Ok(())
}

/// Short preview of a key for display: `sk-a…9z2x`.
///
/// Keys too short to hide anything are fully masked.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

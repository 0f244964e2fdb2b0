//! Whitespace-separated environment variable lists.

use std::env;

/// Split the named environment variable into whitespace-separated fields.
///
/// Runs of Unicode whitespace separate fields and never produce empty
/// entries. An unset or empty variable yields an empty vector, so callers
/// can splice the result into an argument list without a presence check.
pub fn env_fields(key: &str) -> Vec<String> {
    env::var(key)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

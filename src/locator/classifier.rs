use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How eagerly a token is treated as machine-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Used for ids and classes feeding CSS/XPath.
    Lenient,
    /// Used for Page Object attribute names and values.
    Strict,
}

// framework prefix, hyphenated numeric suffix, underscore, h-* utility tokens
static LENIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^ng-|-\d+|_|\bh-\w+)").expect("valid lenient pattern"));

// scoped-style and CSS-in-JS prefixes, long digit runs
static STRICT_EXTRA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^data-v-|^(css|sc|jss|emotion|svelte)-|\d{3,})")
        .expect("valid strict pattern")
});

/// Whether `token` looks auto-generated and unstable across builds.
///
/// Purely syntactic: no document access, same answer for the same input.
pub fn is_dynamic(token: &str, strictness: Strictness) -> bool {
    if LENIENT.is_match(token) {
        return true;
    }

    match strictness {
        Strictness::Lenient => false,
        Strictness::Strict => STRICT_EXTRA.is_match(token) || has_hash_suffix(token),
    }
}

/// A trailing segment of 5-12 ASCII alphanumerics that mixes letters and
/// digits, e.g. `1f99f73c` in `data-v-1f99f73c` or `x7k2p9` in `btn-x7k2p9`.
fn has_hash_suffix(token: &str) -> bool {
    let segment = token.rsplit(['-', '_']).next().unwrap_or(token);

    (5..=12).contains(&segment.len())
        && segment.chars().all(|c| c.is_ascii_alphanumeric())
        && segment.chars().any(|c| c.is_ascii_digit())
        && segment.chars().any(|c| c.is_ascii_alphabetic())
}

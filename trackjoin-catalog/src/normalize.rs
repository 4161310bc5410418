//! Canonical comparison keys for song titles and artist names.
//!
//! The catalog and the chart feed spell the same recordings differently:
//! ```text
//! Hello World (Remix)           Jane Doe
//! Hello World                   Jane Doe feat. Someone
//! HELLO, WORLD!                 Jane  Doe Ft. Other
//! ```
//!
//! [`normalize`] reduces each spelling to one key so the reconciler can use
//! exact equality instead of approximate matching.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("static pattern"));

static FEATURING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:feat|ft|featuring)\.?\b.*").expect("static pattern")
});

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// A normalized title or artist name.
///
/// Only [`normalize`] and [`normalize_str`] construct keys, so two keys are
/// equal exactly when their source texts normalize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NormalizedKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalize an optional source field. Missing text normalizes to the empty key.
///
/// # Examples
///
/// ```
/// use trackjoin_catalog::normalize::normalize;
///
/// assert_eq!(normalize(Some("Hello World (Remix)")), "hello world");
/// assert_eq!(normalize(Some("Jane Doe feat. Someone")), "jane doe");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(text: Option<&str>) -> NormalizedKey {
    normalize_str(text.unwrap_or(""))
}

/// Normalize present text.
///
/// Lowercases, trims, drops `(...)` groups, cuts at a `feat`/`ft`/`featuring`
/// credit, removes punctuation, and collapses whitespace.
pub fn normalize_str(text: &str) -> NormalizedKey {
    let lowered = text.to_lowercase();
    let without_groups = PARENTHESIZED.replace_all(lowered.trim(), "");
    let without_credit = strip_featuring(&without_groups);
    let word_chars = NON_WORD.replace_all(&without_credit, "");
    // Punctuation removal can assemble a new marker ("f.eat" -> "feat").
    let word_chars = strip_featuring(&word_chars);
    let collapsed = WHITESPACE.replace_all(&word_chars, " ");
    NormalizedKey(collapsed.trim().to_string())
}

fn strip_featuring(text: &str) -> Cow<'_, str> {
    FEATURING.replace_all(text, "")
}

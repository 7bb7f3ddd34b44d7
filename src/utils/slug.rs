//! Anchor slugs for heading ids.
//!
//! Rules: lowercase, drop everything except ASCII letters, digits,
//! whitespace and `-`, collapse whitespace runs to a single `-`, cap at
//! [`MAX_SLUG_LEN`] characters. Collisions are not disambiguated.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a generated anchor id.
pub const MAX_SLUG_LEN: usize = 50;

static RE_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Slugify heading text into an anchor id.
///
/// # Examples
/// ```
/// use folio::utils::slug::slugify_anchor;
///
/// assert_eq!(slugify_anchor("Details & More"), "details-more");
/// assert_eq!(slugify_anchor("  Why Rust?  "), "why-rust");
/// ```
pub fn slugify_anchor(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let kept = RE_DISALLOWED.replace_all(&lower, "");
    let dashed = RE_WHITESPACE.replace_all(kept.trim(), "-");
    dashed.chars().take(MAX_SLUG_LEN).collect()
}

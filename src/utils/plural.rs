//! Pluralization utilities.

/// Plural form of a regular English noun: `entry` -> `entries`, `day` -> `days`.
fn plural_noun(noun: &str) -> String {
    match noun.strip_suffix('y') {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['a', 'e', 'i', 'o', 'u']) => {
            format!("{stem}ies")
        }
        _ => format!("{noun}s"),
    }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "url")` -> `"0 urls"`
/// - `plural_count(1, "url")` -> `"1 url"`
/// - `plural_count(3, "entry")` -> `"3 entries"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {}", plural_noun(noun))
    }
}

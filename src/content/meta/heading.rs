//! Heading outline for tables of contents.

use serde::Serialize;

use super::text::collect_text;
use crate::content::scan::{Element, Markup, children};
use crate::utils::slug::slugify_anchor;

/// One `<h1>`..`<h6>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    /// Anchor slug of `text`, not guaranteed unique.
    pub id: String,
}

/// Heading level of a lowercase tag name, if it is one.
fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

/// Headings in document order.
pub(crate) fn outline(markup: &Markup<'_>, elements: &[Element]) -> Vec<HeadingEntry> {
    elements
        .iter()
        .filter_map(|element| {
            let level = heading_level(&element.name)?;
            let tag = markup.tag(element.handle)?;
            let text = collect_text(markup, &children(tag));
            Some(HeadingEntry {
                level,
                id: slugify_anchor(&text),
                text,
            })
        })
        .collect()
}

//! Metadata derived from raw editor content.
//!
//! All derivations describe the authored content, not the rendered output:
//! they run on the raw HTML before any URL rewriting or image hints.
//!
//! | Derivation      | Fallback on malformed markup |
//! |-----------------|------------------------------|
//! | reading time    | `"5 min read"`               |
//! | word count      | `0`                          |
//! | headings        | empty                        |
//! | excerpt         | empty                        |
//! | first image url | `None`                       |
//!
//! `has_images` only looks for `<img` and never fails.

mod excerpt;
mod heading;
mod reading;
mod text;

pub use excerpt::{EXCERPT_LENGTH, truncate_excerpt};
pub use heading::HeadingEntry;
pub use reading::{
    READING_TIME_EMPTY, READING_TIME_FALLBACK, WORDS_PER_MINUTE, format_reading_time, minutes_for,
};
pub use text::{collapse_whitespace, count_words};

use std::sync::LazyLock;

use regex::Regex;

use super::scan::{Element, Markup};
use super::{ContentError, ContentOrigin};
use crate::log;

static RE_IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b").unwrap());

/// Raw content parsed once, shared by every derivation.
pub struct Document<'a> {
    raw: &'a str,
    parsed: Result<Parsed<'a>, ContentError>,
}

struct Parsed<'a> {
    markup: Markup<'a>,
    elements: Vec<Element>,
    text: String,
}

impl<'a> Document<'a> {
    /// Parse `raw`. Malformed markup is logged once and every derivation
    /// then returns its fallback.
    pub fn parse(raw: &'a str) -> Self {
        let parsed = Markup::parse(raw).map(|markup| {
            let elements = markup.elements();
            let text = text::collect_text(&markup, markup.roots());
            Parsed {
                markup,
                elements,
                text,
            }
        });
        if let Err(err) = &parsed {
            log!("content"; "metadata extraction: {err}, using fallbacks");
        }
        Self { raw, parsed }
    }

    /// Visible text with markup stripped and whitespace collapsed.
    pub fn text(&self) -> Option<&str> {
        self.parsed.as_ref().ok().map(|p| p.text.as_str())
    }

    pub fn word_count(&self) -> usize {
        self.text().map_or(0, count_words)
    }

    /// Estimated reading time, e.g. `"3 min read"`.
    pub fn reading_time(&self, words_per_minute: usize) -> String {
        if self.raw.trim().is_empty() {
            return READING_TIME_EMPTY.to_string();
        }
        match self.text() {
            Some(text) => format_reading_time(minutes_for(count_words(text), words_per_minute)),
            None => READING_TIME_FALLBACK.to_string(),
        }
    }

    pub fn headings(&self) -> Vec<HeadingEntry> {
        self.parsed
            .as_ref()
            .map(|p| heading::outline(&p.markup, &p.elements))
            .unwrap_or_default()
    }

    pub fn excerpt(&self, max_length: usize) -> String {
        self.text()
            .map(|text| truncate_excerpt(text, max_length))
            .unwrap_or_default()
    }

    /// Absolute URL of the first image with a `src`.
    pub fn first_image_url(&self, origin: &ContentOrigin) -> Option<String> {
        let parsed = self.parsed.as_ref().ok()?;
        parsed
            .elements
            .iter()
            .filter(|element| element.is("img"))
            .find_map(|element| {
                let src = element.attr("src")?.value.as_deref()?;
                (!src.is_empty()).then(|| origin.resolve(src).into_owned())
            })
    }

    /// Whether the content contains any `<img>` tag.
    pub fn has_images(&self) -> bool {
        RE_IMG.is_match(self.raw)
    }
}

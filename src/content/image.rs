//! Image loading hints.
//!
//! Every `<img>` without an explicit `loading` attribute gets:
//!
//! | position    | added attributes                                   |
//! |-------------|----------------------------------------------------|
//! | first image | `alt`, `decoding="async"`, `loading="eager"`, `fetchpriority="high"` |
//! | others      | `alt`, `decoding="async"`, `loading="lazy"`        |
//!
//! "First" means the first image without `loading`. `alt` and `decoding`
//! are only added when missing. A tag that already declares `loading` is
//! left byte-for-byte unchanged.

use std::fmt::Write;

use super::scan::{Element, Markup};
use super::{ContentError, FailOpen};
use crate::utils::html::escape_attr;

/// Add loading hints to images, returning the input unchanged on malformed markup.
pub fn augment_images(html: &str, default_alt: &str) -> String {
    try_augment_images(html, default_alt).fail_open("image attributes", || html.to_string())
}

/// Add loading hints to images, reporting malformed markup.
pub fn try_augment_images(html: &str, default_alt: &str) -> Result<String, ContentError> {
    let markup = Markup::parse(html)?;

    let (mut out, last) = markup
        .elements()
        .iter()
        .filter(|element| element.is("img") && element.attr("loading").is_none())
        .enumerate()
        .fold(
            (String::with_capacity(html.len() + 128), 0),
            |(mut out, last), (index, element)| {
                out.push_str(&html[last..element.insert_at]);
                out.push_str(&missing_attributes(element, index, default_alt));
                (out, element.insert_at)
            },
        );

    out.push_str(&html[last..]);
    Ok(out)
}

/// Attributes to append to the `index`-th image lacking `loading`.
fn missing_attributes(element: &Element, index: usize, default_alt: &str) -> String {
    let mut extra = String::new();
    if element.attr("alt").is_none() {
        let _ = write!(extra, r#" alt="{}""#, escape_attr(default_alt));
    }
    if element.attr("decoding").is_none() {
        extra.push_str(r#" decoding="async""#);
    }

    if index == 0 {
        extra.push_str(r#" loading="eager""#);
        if element.attr("fetchpriority").is_none() {
            extra.push_str(r#" fetchpriority="high""#);
        }
    } else {
        extra.push_str(r#" loading="lazy""#);
    }

    extra
}

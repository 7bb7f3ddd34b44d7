//! Plain text extraction.

use crate::content::scan::{Markup, children};
use crate::utils::html::{is_block_element, is_raw_text_element, is_void_element, unescape};

/// Visible text of the nodes behind `handles`.
///
/// Block and void elements separate words, inline markup does not,
/// `<script>`/`<style>` bodies are dropped. Entities are decoded and
/// whitespace is collapsed.
pub(crate) fn collect_text(markup: &Markup<'_>, handles: &[tl::NodeHandle]) -> String {
    let mut text = String::with_capacity(markup.source().len());
    push_text(markup.parser(), handles, &mut text);
    collapse_whitespace(&unescape(&text))
}

fn push_text(parser: &tl::Parser<'_>, handles: &[tl::NodeHandle], out: &mut String) {
    for handle in handles {
        match handle.get(parser) {
            Some(tl::Node::Tag(tag)) => {
                let name = tag.name().as_utf8_str().to_ascii_lowercase();
                if is_raw_text_element(&name) {
                    out.push(' ');
                    continue;
                }

                let separates = is_block_element(&name) || is_void_element(&name);
                if separates {
                    out.push(' ');
                }
                push_text(parser, &children(tag), out);
                if separates {
                    out.push(' ');
                }
            }
            Some(tl::Node::Raw(bytes)) => out.push_str(&bytes.as_utf8_str()),
            Some(tl::Node::Comment(_)) | None => {}
        }
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count whitespace separated words.
#[inline]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

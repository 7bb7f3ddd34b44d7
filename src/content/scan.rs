//! Markup parsing.
//!
//! Fragments are parsed with `tl`, which repairs anything it is given.
//! Before that, a lexical pass rejects markup a rewrite cannot splice
//! safely. Each case is a [`ContentError`]:
//!
//! - a tag that runs out of input before its `>`
//! - an unterminated comment
//! - a `<script>`/`<style>` body without its end tag
//!
//! [`Element`]s carry byte offsets into the source, so rewriters splice
//! new values in place and every other byte stays as authored.

use std::ops::Range;

use super::ContentError;
use crate::utils::html::is_raw_text_element;

/// A parsed fragment borrowing its source.
pub struct Markup<'a> {
    source: &'a str,
    dom: tl::VDom<'a>,
}

impl<'a> Markup<'a> {
    /// Check and parse `source`.
    pub fn parse(source: &'a str) -> Result<Self, ContentError> {
        check(source)?;
        let dom = tl::parse(source, tl::ParserOptions::default())
            .map_err(|_| ContentError::TooLarge { len: source.len() })?;
        Ok(Self { source, dom })
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn parser(&self) -> &tl::Parser<'a> {
        self.dom.parser()
    }

    /// Top-level nodes in document order.
    #[inline]
    pub fn roots(&self) -> &[tl::NodeHandle] {
        self.dom.children()
    }

    /// The tag behind `handle`, if it is one.
    pub fn tag(&self, handle: tl::NodeHandle) -> Option<&tl::HTMLTag<'a>> {
        match handle.get(self.parser())? {
            tl::Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Every element in document order.
    ///
    /// `<script>` and `<style>` elements are listed, their bodies are not.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements = Vec::new();
        self.collect_elements(self.roots(), &mut elements);
        elements
    }

    fn collect_elements(&self, handles: &[tl::NodeHandle], out: &mut Vec<Element>) {
        for &handle in handles {
            let Some(tag) = self.tag(handle) else {
                continue;
            };
            let Some(element) = Element::locate(self.source, handle, tag) else {
                continue;
            };

            let descend = !is_raw_text_element(&element.name);
            out.push(element);
            if descend {
                self.collect_elements(&children(tag), out);
            }
        }
    }
}

/// Direct children of `tag` in document order.
pub fn children(tag: &tl::HTMLTag<'_>) -> Vec<tl::NodeHandle> {
    tag.children().top().iter().copied().collect()
}

/// A start tag located in the source.
#[derive(Debug, Clone)]
pub struct Element {
    pub handle: tl::NodeHandle,
    /// Lowercase tag name.
    pub name: String,
    /// Whole start tag, `<` through `>`.
    pub span: Range<usize>,
    /// Where appended attributes go: after the last attribute, before `/>`.
    pub insert_at: usize,
    pub attrs: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// `None` for boolean attributes.
    pub value: Option<String>,
    /// Source range of a non-empty `value`.
    pub value_span: Option<Range<usize>>,
}

impl Element {
    fn locate(source: &str, handle: tl::NodeHandle, tag: &tl::HTMLTag<'_>) -> Option<Self> {
        let name = tag.name().as_utf8_str();
        let name_start = offset_in(source, &name)?;
        let name_end = name_start + name.len();
        let gt = tag_end(source, name_end)?;

        let attrs = tag
            .attributes()
            .iter()
            .map(|(key, value)| {
                let value_span = value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .and_then(|v| offset_in(source, v).map(|start| start..start + v.len()));
                Attribute {
                    name: key.to_ascii_lowercase(),
                    value: value.map(|v| v.into_owned()),
                    value_span,
                }
            })
            .collect();

        Some(Self {
            handle,
            name: name.to_ascii_lowercase(),
            span: name_start - 1..gt + 1,
            insert_at: insert_point(source, name_end, gt),
            attrs,
        })
    }

    /// Whether this is a `name` element; `name` must be lowercase.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Attribute by lowercase name.
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

/// Byte offset of `part` inside `source`, if it borrows from it.
fn offset_in(source: &str, part: &str) -> Option<usize> {
    let start = (part.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
    (start + part.len() <= source.len()).then_some(start)
}

/// Offset just past the last attribute of a tag closing at `gt`.
///
/// A `/` before `>` marks a self-closing tag only after the name,
/// whitespace or a quoted value. Otherwise it ends an unquoted value,
/// as in `src=/media/`.
fn insert_point(source: &str, name_end: usize, gt: usize) -> usize {
    let bytes = source.as_bytes();
    let mut end = gt;
    if end > name_end && bytes[end - 1] == b'/' {
        let slash = end - 1;
        if slash == name_end
            || matches!(bytes[slash - 1], b'"' | b'\'')
            || bytes[slash - 1].is_ascii_whitespace()
        {
            end = slash;
        }
    }
    name_end + source[name_end..end].trim_end().len()
}

// =============================================================================
// Well-formedness
// =============================================================================

/// Reject markup that cannot be spliced safely.
///
/// A `<` not followed by a letter, `/letter`, `!` or `?` is literal text.
pub fn check(html: &str) -> Result<(), ContentError> {
    let bytes = html.as_bytes();
    let mut pos = 0;

    while let Some(rel) = html[pos..].find('<') {
        let lt = pos + rel;
        pos = match bytes.get(lt + 1).copied() {
            Some(b'!') if html[lt..].starts_with("<!--") => html[lt + 4..]
                .find("-->")
                .map(|end| lt + 4 + end + 3)
                .ok_or(ContentError::UnclosedComment { offset: lt })?,
            Some(b'!' | b'?') => html[lt..]
                .find('>')
                .map(|end| lt + end + 1)
                .ok_or_else(|| unclosed("!", lt))?,
            Some(b'/') if bytes.get(lt + 2).is_some_and(u8::is_ascii_alphabetic) => {
                let name = tag_name(html, lt + 2);
                tag_end(html, lt + 2 + name.len()).ok_or_else(|| unclosed(name, lt))? + 1
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name = tag_name(html, lt + 1);
                let gt = tag_end(html, lt + 1 + name.len()).ok_or_else(|| unclosed(name, lt))?;
                let name = name.to_ascii_lowercase();
                if is_raw_text_element(&name) && bytes[gt - 1] != b'/' {
                    raw_text_end(html, gt + 1, &name).ok_or_else(|| {
                        ContentError::UnclosedRawText {
                            name: name.clone(),
                            offset: lt,
                        }
                    })?
                } else {
                    gt + 1
                }
            }
            _ => lt + 1,
        };
    }

    Ok(())
}

fn unclosed(name: &str, offset: usize) -> ContentError {
    ContentError::UnclosedTag {
        name: name.to_string(),
        offset,
    }
}

fn tag_name(html: &str, start: usize) -> &str {
    let len = html[start..]
        .bytes()
        .take_while(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':'))
        .count();
    &html[start..start + len]
}

/// Offset of the `>` closing a tag; quoted values after `=` may contain `>`.
fn tag_end(html: &str, from: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut i = from;
    loop {
        match bytes.get(i).copied()? {
            b'>' => return Some(i),
            b'=' => {
                i += 1;
                while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                    i += 1;
                }
                if let Some(quote @ (b'"' | b'\'')) = bytes.get(i).copied() {
                    i += html[i + 1..].bytes().position(|b| b == quote)? + 2;
                }
            }
            _ => i += 1,
        }
    }
}

/// Offset of the `</name` ending a raw text body that starts at `from`.
fn raw_text_end(html: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = html.as_bytes();
    html[from..]
        .match_indices("</")
        .map(|(i, _)| from + i)
        .find(|&i| {
            bytes
                .get(i + 2..i + 2 + name.len())
                .is_some_and(|found| found.eq_ignore_ascii_case(name.as_bytes()))
        })
}

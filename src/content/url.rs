//! Asset URL rewriting.
//!
//! Relative `src` values of `<img>`, `<source>` and `<audio>` are resolved
//! against the content server origin so pages rendered on another host
//! still load editor-uploaded media. Every other byte is preserved.

use super::origin::is_absolute;
use super::scan::{Element, Markup};
use super::{ContentError, ContentOrigin, FailOpen};

/// Elements whose `src` points at content-server media.
const SRC_ELEMENTS: [&str; 3] = ["img", "source", "audio"];

/// Rewrite relative asset URLs, returning the input unchanged on malformed markup.
pub fn rewrite_asset_urls(html: &str, origin: &ContentOrigin) -> String {
    try_rewrite_asset_urls(html, origin).fail_open("asset url rewrite", || html.to_string())
}

/// Rewrite relative asset URLs, reporting malformed markup.
pub fn try_rewrite_asset_urls(html: &str, origin: &ContentOrigin) -> Result<String, ContentError> {
    if html.is_empty() {
        return Ok(String::new());
    }

    let markup = Markup::parse(html)?;
    let mut out = String::with_capacity(html.len() + 64);
    let mut last = 0;

    for element in markup.elements().iter().filter(|e| is_src_element(e)) {
        let Some(src) = element.attr("src") else {
            continue;
        };
        let (Some(value), Some(span)) = (src.value.as_deref(), src.value_span.clone()) else {
            continue;
        };
        if is_absolute(value) {
            continue;
        }

        out.push_str(&html[last..span.start]);
        out.push_str(&origin.resolve(value));
        last = span.end;
    }

    out.push_str(&html[last..]);
    Ok(out)
}

#[inline]
fn is_src_element(element: &Element) -> bool {
    SRC_ELEMENTS.iter().any(|name| element.is(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> ContentOrigin {
        ContentOrigin::parse("https://api.example.com").unwrap()
    }

    fn rewrite(html: &str) -> String {
        rewrite_asset_urls(html, &origin())
    }

    #[test]
    fn test_relative_img() {
        assert_eq!(
            rewrite(r#"<img src="../media/a.jpg"><img src="b.jpg">"#),
            r#"<img src="https://api.example.com/media/a.jpg"><img src="https://api.example.com/b.jpg">"#
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            rewrite(r#"<img class="hero" src="/media/a.jpg" width="10">"#),
            r#"<img class="hero" src="https://api.example.com/media/a.jpg" width="10">"#
        );
    }

    #[test]
    fn test_source_and_audio() {
        let html = r#"<picture><source src="media/a.webp" type="image/webp"></picture><audio src="../media/a.mp3" controls></audio>"#;
        assert_eq!(
            rewrite(html),
            r#"<picture><source src="https://api.example.com/media/a.webp" type="image/webp"></picture><audio src="https://api.example.com/media/a.mp3" controls></audio>"#
        );
    }

    #[test]
    fn test_absolute_untouched() {
        let html = r#"<img src="https://cdn.example.com/a.jpg"><img src="http://x.test/b.jpg">"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn test_other_elements_untouched() {
        let html = r#"<script src="app.js"></script><iframe src="embed.html"></iframe><a href="page">x</a>"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn test_missing_or_empty_src_untouched() {
        let html = r#"<img alt="no source"><img src="">"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn test_single_quotes_and_unquoted() {
        assert_eq!(
            rewrite("<img src='a.jpg'><img src=b.jpg>"),
            "<img src='https://api.example.com/a.jpg'><img src=https://api.example.com/b.jpg>"
        );
    }

    #[test]
    fn test_uppercase_tag() {
        assert_eq!(
            rewrite(r#"<IMG SRC="a.jpg">"#),
            r#"<IMG SRC="https://api.example.com/a.jpg">"#
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rewrite(""), "");
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<p>Intro</p><img src="../a.jpg"><audio src="b.mp3"></audio>"#;
        let once = rewrite(html);
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_malformed_returns_input() {
        let html = r#"<p>broken <img src="a.jpg""#;
        assert_eq!(rewrite(html), html);
        assert!(try_rewrite_asset_urls(html, &origin()).is_err());
    }

    #[test]
    fn test_text_untouched() {
        let html = r#"<p>Write src="x.jpg" in your template</p>"#;
        assert_eq!(rewrite(html), html);
    }
}

//! Rich-content rendering pipeline.
//!
//! Turns editor-authored HTML from the content API into render-ready HTML
//! and derives page metadata from it.
//!
//! ```text
//! raw html ──► url::rewrite_asset_urls ──► image::augment_images ──► html
//!     │
//!     └──────► meta::Document ──► reading time, words, outline, excerpt
//! ```
//!
//! Every public operation is pure and fail-open: malformed markup never
//! aborts a page render, it degrades to passthrough or a fixed fallback.

mod error;
pub mod image;
pub mod meta;
mod origin;
pub mod scan;
pub mod url;

pub use error::{ContentError, FailOpen};
pub use meta::{Document, HeadingEntry};
pub use origin::{ContentOrigin, OriginError, is_absolute, normalize_asset_path};

use serde::Serialize;

/// Which page family a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Blog post bodies.
    Blog,
    /// Portfolio overviews and solution descriptions.
    Overview,
}

/// Tunables of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentOptions {
    pub blog_alt: String,
    pub overview_alt: String,
    pub excerpt_length: usize,
    pub words_per_minute: usize,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            blog_alt: "Blog image".into(),
            overview_alt: "Portfolio image".into(),
            excerpt_length: meta::EXCERPT_LENGTH,
            words_per_minute: meta::WORDS_PER_MINUTE,
        }
    }
}

impl ContentOptions {
    /// Default `alt` text for images of `kind`.
    pub fn alt_for(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Blog => &self.blog_alt,
            ContentKind::Overview => &self.overview_alt,
        }
    }
}

/// Everything a page template needs from one blog body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub html: String,
    pub reading_time: String,
    pub word_count: usize,
    pub has_images: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_image_url: Option<String>,
    pub headings: Vec<HeadingEntry>,
    pub excerpt: String,
}

/// Configured content pipeline.
///
/// Holds only immutable data, so one instance can serve concurrent renders.
#[derive(Debug, Clone)]
pub struct Pipeline {
    origin: ContentOrigin,
    options: ContentOptions,
}

impl Pipeline {
    pub fn new(origin: ContentOrigin, options: ContentOptions) -> Self {
        Self { origin, options }
    }

    pub fn origin(&self) -> &ContentOrigin {
        &self.origin
    }

    pub fn options(&self) -> &ContentOptions {
        &self.options
    }

    /// Rewrite asset URLs, then add image loading hints for `kind`.
    pub fn process(&self, raw: &str, kind: ContentKind) -> String {
        let rewritten = url::rewrite_asset_urls(raw, &self.origin);
        image::augment_images(&rewritten, self.options.alt_for(kind))
    }

    /// Render-ready HTML for a blog post body.
    pub fn process_for_blog(&self, raw: &str) -> String {
        self.process(raw, ContentKind::Blog)
    }

    /// Render-ready HTML for a portfolio overview or solution description.
    pub fn process_for_overview(&self, raw: &str) -> String {
        self.process(raw, ContentKind::Overview)
    }

    /// Processed HTML plus metadata derived from the raw content.
    pub fn extract_metadata(&self, raw: &str) -> ContentMetadata {
        let doc = Document::parse(raw);

        ContentMetadata {
            html: self.process_for_blog(raw),
            reading_time: doc.reading_time(self.options.words_per_minute),
            word_count: doc.word_count(),
            has_images: doc.has_images(),
            first_image_url: doc.first_image_url(&self.origin),
            headings: doc.headings(),
            excerpt: doc.excerpt(self.options.excerpt_length),
        }
    }
}

//! `[content]` section configuration.
//!
//! Controls the rich-content pipeline.
//!
//! # Example
//!
//! ```toml
//! [content]
//! origin = "https://api.example.com"   # Asset host for relative src values
//! blog_alt = "Blog image"              # Default alt text on blog images
//! overview_alt = "Portfolio image"     # Default alt text on overview images
//! excerpt_length = 160                 # Excerpt budget in characters
//! words_per_minute = 200               # Reading speed
//! ```
//!
//! `origin` can also come from `FOLIO_CONTENT_ORIGIN` or `--origin`.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::content::{ContentOptions, ContentOrigin};

/// Content pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSectionConfig {
    /// Base URL of the content server.
    pub origin: Option<String>,

    /// Alt text for blog images without one.
    pub blog_alt: String,

    /// Alt text for portfolio and solution images without one.
    pub overview_alt: String,

    /// Maximum excerpt length in characters.
    pub excerpt_length: usize,

    /// Reading speed used for reading time.
    pub words_per_minute: usize,
}

impl Default for ContentSectionConfig {
    fn default() -> Self {
        let options = ContentOptions::default();
        Self {
            origin: None,
            blog_alt: options.blog_alt,
            overview_alt: options.overview_alt,
            excerpt_length: options.excerpt_length,
            words_per_minute: options.words_per_minute,
        }
    }
}

pub struct ContentFields {
    pub origin: FieldPath,
    pub excerpt_length: FieldPath,
    pub words_per_minute: FieldPath,
}

impl ContentSectionConfig {
    pub const FIELDS: ContentFields = ContentFields {
        origin: FieldPath::new("content.origin"),
        excerpt_length: FieldPath::new("content.excerpt_length"),
        words_per_minute: FieldPath::new("content.words_per_minute"),
    };

    /// Validate content configuration.
    ///
    /// # Checks
    /// - If `origin_required`, `origin` must be set
    /// - `origin` must be an http(s) URL with a host
    /// - `excerpt_length` and `words_per_minute` must be positive
    pub fn validate(&self, origin_required: bool, diag: &mut ConfigDiagnostics) {
        match &self.origin {
            Some(origin) => {
                if let Err(e) = ContentOrigin::parse(origin) {
                    diag.error_with_hint(
                        Self::FIELDS.origin,
                        e.to_string(),
                        "use format like https://api.example.com",
                    );
                }
            }
            None if origin_required => {
                diag.error_with_hint(
                    Self::FIELDS.origin,
                    format!("{} is not configured", Self::FIELDS.origin),
                    "set it in folio.toml, FOLIO_CONTENT_ORIGIN or --origin",
                );
            }
            None => {}
        }

        if self.excerpt_length == 0 {
            diag.error(Self::FIELDS.excerpt_length, "must be greater than 0");
        }
        if self.words_per_minute == 0 {
            diag.error(Self::FIELDS.words_per_minute, "must be greater than 0");
        }
    }

    /// Pipeline tunables from this section.
    pub fn options(&self) -> ContentOptions {
        ContentOptions {
            blog_alt: self.blog_alt.clone(),
            overview_alt: self.overview_alt.clone(),
            excerpt_length: self.excerpt_length,
            words_per_minute: self.words_per_minute,
        }
    }
}

//! Folio - rich-content rendering pipeline for an agency website.
//!
//! Turns editor-authored HTML from the content API into render-ready HTML
//! (absolute asset URLs, image loading hints) and derives reading time,
//! word count, heading outline, first image and excerpt. Also builds the
//! site's `sitemap.xml` from static routes and collection listings.
//!
//! ```
//! use folio::content::{ContentOptions, ContentOrigin, Pipeline};
//!
//! let origin = ContentOrigin::parse("https://api.example.com").unwrap();
//! let pipeline = Pipeline::new(origin, ContentOptions::default());
//!
//! let meta = pipeline.extract_metadata("<h2>Intro</h2><p>Hello world</p>");
//! assert_eq!(meta.reading_time, "1 min read");
//! assert_eq!(meta.headings[0].id, "intro");
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod generator;
pub mod logger;
pub mod utils;

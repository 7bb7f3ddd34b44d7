//! Generated site files.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`) built from the
//!   configured static routes and the content API's collection listings.

pub mod sitemap;

use std::borrow::Cow;

/// Drop indentation and blank lines from generated XML when `enabled`.
pub fn minify_xml(xml: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(xml);
    }
    Cow::Owned(
        xml.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect(),
    )
}

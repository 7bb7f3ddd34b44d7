//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module    | TOML Section  | Purpose                                  |
//! |-----------|---------------|------------------------------------------|
//! | `content` | `[content]`   | Content origin, alt texts, excerpt, wpm  |
//! | `site`    | `[site]`      | Public site URL                          |
//! | `sitemap` | `[sitemap]`   | Output path, static pages, collections   |

mod content;
mod site;
mod sitemap;

pub use content::ContentSectionConfig;
pub use site::SiteSectionConfig;
pub use sitemap::{ChangeFreq, CollectionConfig, SitemapConfig};

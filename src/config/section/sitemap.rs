//! `[sitemap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sitemap]
//! path = "public/sitemap.xml"
//! pages = ["/", "/services", "/portfolio", "/blog", "/solutions", "/contact"]
//! minify = false
//!
//! [[sitemap.collections]]
//! name = "blog"            # Reads <data-dir>/blog.json
//! route = "/blog"          # Entries become /blog/<slug>
//! changefreq = "weekly"
//! priority = 0.7
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// One content collection listed in the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Listing file stem, `<name>.json` in the data directory.
    pub name: String,

    /// Route prefix of the collection's detail pages.
    pub route: String,

    #[serde(default = "default_collection_changefreq")]
    pub changefreq: ChangeFreq,

    #[serde(default = "default_collection_priority")]
    pub priority: f32,
}

fn default_collection_changefreq() -> ChangeFreq {
    ChangeFreq::Weekly
}

fn default_collection_priority() -> f32 {
    0.7
}

impl CollectionConfig {
    fn new(name: &str, route: &str) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            changefreq: default_collection_changefreq(),
            priority: default_collection_priority(),
        }
    }
}

/// Sitemap generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Output path for the sitemap file.
    pub path: PathBuf,

    /// Static routes, in output order.
    pub pages: Vec<String>,

    /// Collections whose slugs become detail routes.
    pub collections: Vec<CollectionConfig>,

    /// Strip indentation and newlines from the XML.
    pub minify: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            path: "sitemap.xml".into(),
            pages: ["/", "/services", "/portfolio", "/blog", "/solutions", "/contact"]
                .map(String::from)
                .to_vec(),
            collections: vec![
                CollectionConfig::new("services", "/services"),
                CollectionConfig::new("portfolio", "/portfolio"),
                CollectionConfig::new("blog", "/blog"),
                CollectionConfig::new("solutions", "/solutions"),
            ],
            minify: false,
        }
    }
}

pub struct SitemapFields {
    pub pages: FieldPath,
    pub collections: FieldPath,
}

impl SitemapConfig {
    pub const FIELDS: SitemapFields = SitemapFields {
        pages: FieldPath::new("sitemap.pages"),
        collections: FieldPath::new("sitemap.collections"),
    };

    /// Validate sitemap configuration.
    ///
    /// # Checks
    /// - routes must start with `/`
    /// - collection priorities must lie in `0.0..=1.0`
    /// - duplicated routes are reported as warnings
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut seen = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            if !page.starts_with('/') {
                diag.error_with_hint(
                    Self::FIELDS.pages,
                    format!("route `{page}` must start with `/`"),
                    format!("use \"/{}\"", page.trim_start_matches('/')),
                );
            }
            if seen.contains(&page) {
                diag.warn(Self::FIELDS.pages, format!("duplicate route `{page}`"));
            }
            seen.push(page);
        }

        for collection in &self.collections {
            if !collection.route.starts_with('/') {
                diag.error(
                    Self::FIELDS.collections,
                    format!(
                        "collection `{}`: route `{}` must start with `/`",
                        collection.name, collection.route
                    ),
                );
            }
            if !(0.0..=1.0).contains(&collection.priority) {
                diag.error(
                    Self::FIELDS.collections,
                    format!(
                        "collection `{}`: priority {} must be between 0.0 and 1.0",
                        collection.name, collection.priority
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_sitemap_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.sitemap.path, PathBuf::from("sitemap.xml"));
        assert_eq!(config.sitemap.pages.len(), 6);
        assert_eq!(config.sitemap.pages[0], "/");
        let names: Vec<_> = config.sitemap.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["services", "portfolio", "blog", "solutions"]);
    }

    #[test]
    fn test_sitemap_collections() {
        let config = test_parse_config(
            r#"
[sitemap]
path = "public/sitemap.xml"
pages = ["/", "/about"]

[[sitemap.collections]]
name = "blog"
route = "/journal"
changefreq = "daily"

[[sitemap.collections]]
name = "portfolio"
route = "/work"
priority = 0.9
"#,
        );
        let sitemap = &config.sitemap;
        assert_eq!(sitemap.path, PathBuf::from("public/sitemap.xml"));
        assert_eq!(sitemap.pages, ["/", "/about"]);
        assert_eq!(sitemap.collections.len(), 2);
        assert_eq!(sitemap.collections[0].changefreq, ChangeFreq::Daily);
        assert_eq!(sitemap.collections[0].priority, 0.7);
        assert_eq!(sitemap.collections[1].changefreq, ChangeFreq::Weekly);
        assert_eq!(sitemap.collections[1].priority, 0.9);
    }

    #[test]
    fn test_invalid_changefreq() {
        let content = "[[sitemap.collections]]\nname = \"blog\"\nroute = \"/blog\"\nchangefreq = \"sometimes\"";
        assert!(toml::from_str::<crate::config::SiteConfig>(content).is_err());
    }

    #[test]
    fn test_validate() {
        let mut sitemap = SitemapConfig::default();
        let mut diag = ConfigDiagnostics::new();
        sitemap.validate(&mut diag);
        assert!(diag.is_empty());

        sitemap.pages.push("contact".into());
        sitemap.pages.push("/blog".into());
        sitemap.collections[0].priority = 1.5;
        let mut diag = ConfigDiagnostics::new();
        sitemap.validate(&mut diag);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warnings().len(), 1);
    }
}

//! Sitemap generation.
//!
//! Lists the site's static routes followed by one entry per item of every
//! configured content collection.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/first-post</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.7</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    api::{CollectionItem, parse_collection},
    config::{ChangeFreq, CollectionConfig, SiteConfig},
    debug,
    generator::minify_xml,
    log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const HOME_PRIORITY: f32 = 1.0;
const PAGE_PRIORITY: f32 = 0.8;

/// Build the sitemap from static pages and `<data_dir>/<collection>.json`.
///
/// Missing listing files are skipped; unreadable or invalid ones fail.
pub fn build_sitemap(config: &SiteConfig, data_dir: &Path) -> Result<Sitemap> {
    let base_url = config.site.base_url();
    let mut sitemap = Sitemap::default();
    sitemap.add_pages(base_url, &config.sitemap.pages);

    for collection in &config.sitemap.collections {
        let path = data_dir.join(format!("{}.json", collection.name));
        if !path.exists() {
            debug!("sitemap"; "no listing for `{}` at {}, skipping", collection.name, path.display());
            continue;
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let items = parse_collection(&json)
            .with_context(|| format!("Failed to parse collection listing {}", path.display()))?;

        debug!("sitemap"; "{}: {}", collection.name, plural_count(items.len(), "entry"));
        sitemap.add_collection(base_url, collection, &items);
    }

    Ok(sitemap)
}

#[derive(Debug, Default)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl Sitemap {
    /// Add static routes; `/` gets the home page priority.
    pub fn add_pages(&mut self, base_url: &str, pages: &[String]) {
        self.urls.extend(pages.iter().map(|route| {
            let is_home = route == "/";
            UrlEntry {
                loc: join_url(base_url, route),
                lastmod: None,
                changefreq: Some(if is_home {
                    ChangeFreq::Weekly
                } else {
                    ChangeFreq::Monthly
                }),
                priority: Some(if is_home { HOME_PRIORITY } else { PAGE_PRIORITY }),
            }
        }));
    }

    /// Add one `<route>/<slug>` entry per collection item.
    pub fn add_collection(
        &mut self,
        base_url: &str,
        collection: &CollectionConfig,
        items: &[CollectionItem],
    ) {
        let route = collection.route.trim_end_matches('/');
        self.urls.extend(items.iter().map(|item| UrlEntry {
            loc: format!("{}{}/{}", base_url, route, item.slug.trim_matches('/')),
            lastmod: item.updated_at.clone(),
            changefreq: Some(collection.changefreq),
            priority: Some(collection.priority),
        }));
    }

    pub fn urls(&self) -> &[UrlEntry] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&escape_xml(&lastmod));
                xml.push_str("</lastmod>\n");
            }
            if let Some(changefreq) = entry.changefreq {
                xml.push_str("    <changefreq>");
                xml.push_str(changefreq.as_str());
                xml.push_str("</changefreq>\n");
            }
            if let Some(priority) = entry.priority {
                xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write to `path`, or to stdout when `path` is `-`.
    pub fn write(self, path: &Path, minify: bool) -> Result<()> {
        let count = self.len();
        let xml = self.into_xml();
        let xml = minify_xml(&xml, minify);

        if path == Path::new("-") {
            print!("{xml}");
            return Ok(());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml.as_bytes())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{} → {}", plural_count(count, "url"), path.display());
        Ok(())
    }
}

/// Join the site URL and a root-relative route.
fn join_url(base_url: &str, route: &str) -> String {
    if route == "/" {
        format!("{base_url}/")
    } else {
        format!("{base_url}/{}", route.trim_start_matches('/'))
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    fn collection(name: &str, route: &str) -> CollectionConfig {
        CollectionConfig {
            name: name.into(),
            route: route.into(),
            changefreq: ChangeFreq::Weekly,
            priority: 0.7,
        }
    }

    fn item(slug: &str, updated_at: Option<&str>) -> CollectionItem {
        CollectionItem {
            slug: slug.into(),
            updated_at: updated_at.map(String::from),
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://example.com", "/"), "https://example.com/");
        assert_eq!(join_url("https://example.com", "/blog"), "https://example.com/blog");
        assert_eq!(join_url("https://example.com", "contact"), "https://example.com/contact");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::default().into_xml();
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_static_pages() {
        let mut sitemap = Sitemap::default();
        sitemap.add_pages("https://example.com", &["/".into(), "/services".into()]);

        assert_eq!(sitemap.urls()[0].priority, Some(1.0));
        assert_eq!(sitemap.urls()[0].changefreq, Some(ChangeFreq::Weekly));
        assert_eq!(sitemap.urls()[1].priority, Some(0.8));
        assert_eq!(sitemap.urls()[1].changefreq, Some(ChangeFreq::Monthly));

        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/services</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_collection_entries() {
        let mut sitemap = Sitemap::default();
        sitemap.add_collection(
            "https://example.com",
            &collection("blog", "/blog/"),
            &[item("hello-world", Some("2025-01-02")), item("second", None)],
        );

        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.com/blog/hello-world</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/second</loc>"));
        assert!(xml.contains("<lastmod>2025-01-02</lastmod>"));
        assert_eq!(xml.matches("<lastmod>").count(), 1);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
        assert_eq!(xml.matches("<priority>0.7</priority>").count(), 2);
    }

    #[test]
    fn test_sitemap_escapes_special_chars() {
        let mut sitemap = Sitemap::default();
        sitemap.add_pages("https://example.com", &["/search?q=a&b=c".into()]);
        let xml = sitemap.into_xml();
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let mut sitemap = Sitemap::default();
        sitemap.add_pages("https://example.com", &["/".into()]);
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
    }

    #[test]
    fn test_build_sitemap_from_listings() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("blog.json"),
            r#"{"data": [{"slug": "launch", "updatedAt": "2025-03-01"}, {"slug": "recap"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("portfolio.json"),
            r#"{"data": [{"slug": "acme-redesign"}]}"#,
        )
        .unwrap();

        let config = test_parse_config(
            "[site]\nurl = \"https://agency.example.com/\"\n[sitemap]\npages = [\"/\", \"/contact\"]",
        );
        let sitemap = build_sitemap(&config, dir.path()).unwrap();

        let locs: Vec<&str> = sitemap.urls().iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            [
                "https://agency.example.com/",
                "https://agency.example.com/contact",
                "https://agency.example.com/portfolio/acme-redesign",
                "https://agency.example.com/blog/launch",
                "https://agency.example.com/blog/recap",
            ]
        );
        assert_eq!(sitemap.urls()[3].lastmod.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_build_sitemap_invalid_listing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("services.json"), "[]").unwrap();

        let config = test_parse_config("[site]\nurl = \"https://agency.example.com\"");
        assert!(build_sitemap(&config, dir.path()).is_err());
    }

    #[test]
    fn test_write_sitemap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("public/sitemap.xml");

        let mut sitemap = Sitemap::default();
        sitemap.add_pages("https://example.com", &["/".into()]);
        sitemap.write(&path, true).unwrap();

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<url><loc>https://example.com/</loc>"));
    }
}

//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://agency.example.com"   # Public URL, prefix of sitemap entries
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Public site settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public site URL (e.g., "https://agency.example.com").
    pub url: Option<String>,
}

pub struct SiteFields {
    pub url: FieldPath,
}

impl SiteSectionConfig {
    pub const FIELDS: SiteFields = SiteFields {
        url: FieldPath::new("site.url"),
    };

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `url_required`, `url` must be set
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self, url_required: bool, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            if url_required {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("sitemap generation requires {}", Self::FIELDS.url),
                    format!("set {}, e.g.: \"https://example.com\"", Self::FIELDS.url),
                );
            }
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }

    /// Site URL without trailing slash, empty when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_url() {
        let config = test_parse_config("[site]\nurl = \"https://agency.example.com/\"");
        assert_eq!(config.site.base_url(), "https://agency.example.com");
    }

    #[test]
    fn test_url_required() {
        let mut diag = ConfigDiagnostics::new();
        SiteSectionConfig::default().validate(true, &mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        SiteSectionConfig::default().validate(false, &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_invalid_url() {
        for url in ["not a url", "ftp://example.com"] {
            let site = SiteSectionConfig {
                url: Some(url.into()),
            };
            let mut diag = ConfigDiagnostics::new();
            site.validate(false, &mut diag);
            assert!(diag.has_errors(), "{url}");
        }
    }
}

//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── content    # [content]
//! │   ├── site       # [site]
//! │   └── sitemap    # [sitemap]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[site]`     | Public site URL                                  |
//! | `[content]`  | Content origin, alt texts, excerpt, reading time |
//! | `[sitemap]`  | Sitemap path, static pages, collections          |
//!
//! A missing config file means defaults. `content.origin` is overridden by
//! `FOLIO_CONTENT_ORIGIN`, which is overridden by `--origin`.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    ChangeFreq, CollectionConfig, ContentSectionConfig, SiteSectionConfig, SitemapConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::Cli,
    content::{ContentOrigin, Pipeline},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable overriding `content.origin`.
pub const ORIGIN_ENV: &str = "FOLIO_CONTENT_ORIGIN";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Public site settings
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Content pipeline settings
    #[serde(default)]
    pub content: ContentSectionConfig,

    /// Sitemap settings
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file, applies environment
    /// and CLI overrides, then validates for the current command.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let env_origin = std::env::var(ORIGIN_ENV).ok();
        config.apply_origin_overrides(env_origin.as_deref(), cli.origin.as_deref());
        config.validate(cli)?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Directory containing the config file, cwd-relative when on defaults.
    pub fn root(&self) -> &Path {
        self.config_path.parent().unwrap_or(Path::new(""))
    }

    /// Join a path with the config directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root().join(path)
    }

    // ========================================================================
    // overrides
    // ========================================================================

    /// Apply `content.origin` overrides; blank values are ignored and the
    /// CLI value wins over the environment.
    fn apply_origin_overrides(&mut self, env_origin: Option<&str>, cli_origin: Option<&str>) {
        let overrides = [env_origin, cli_origin];
        for origin in overrides.into_iter().flatten() {
            if !origin.trim().is_empty() {
                self.content.origin = Some(origin.trim().to_string());
            }
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        self.validate_for(cli.needs_origin(), cli.is_sitemap())
    }

    fn validate_for(&self, origin_required: bool, site_url_required: bool) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(site_url_required, &mut diag);
        self.content.validate(origin_required, &mut diag);
        self.sitemap.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    // ========================================================================
    // pipeline
    // ========================================================================

    /// Content pipeline configured from `[content]`.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let origin = self.content.origin.as_deref().ok_or_else(|| {
            ConfigError::Validation(format!("{} is not set", ContentSectionConfig::FIELDS.origin.as_str()))
        })?;
        let origin = ContentOrigin::parse(origin)?;
        Ok(Pipeline::new(origin, self.content.options()))
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[content\norigin = \"https://x.test\"").is_err());
    }

    #[test]
    fn test_from_str() {
        let config = SiteConfig::from_str("[content]\norigin = \"https://api.example.com\"").unwrap();
        assert_eq!(config.content.origin.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.root(), Path::new(""));
        assert_eq!(config.site.url, None);
        assert_eq!(config.content.excerpt_length, 160);
        assert_eq!(config.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[content]\norigin = \"https://api.example.com\"\nexcerpt_len = 10\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.content.origin.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.content.excerpt_length, 160);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f == "content.excerpt_len"));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\nurl = \"https://example.com\"\n[content]\nwords_per_minute = 180";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "[content]\nblog_alt = \"Post image\"").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert_eq!(config.content.blog_alt, "Post image");

        let missing = SiteConfig::from_path(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_root_join() {
        let config = SiteConfig {
            config_path: PathBuf::from("/srv/site/folio.toml"),
            ..Default::default()
        };
        assert_eq!(config.root_join("data"), PathBuf::from("/srv/site/data"));
    }

    #[test]
    fn test_origin_override_order() {
        let mut config = test_parse_config("[content]\norigin = \"https://file.test\"");

        config.apply_origin_overrides(None, None);
        assert_eq!(config.content.origin.as_deref(), Some("https://file.test"));

        config.apply_origin_overrides(Some("https://env.test"), None);
        assert_eq!(config.content.origin.as_deref(), Some("https://env.test"));

        config.apply_origin_overrides(Some("https://env.test"), Some("https://cli.test"));
        assert_eq!(config.content.origin.as_deref(), Some("https://cli.test"));

        config.apply_origin_overrides(Some("  "), Some(""));
        assert_eq!(config.content.origin.as_deref(), Some("https://cli.test"));
    }

    #[test]
    fn test_validate_for_commands() {
        let config = SiteConfig::default();
        assert!(config.validate_for(false, false).is_ok());
        assert!(config.validate_for(true, false).is_err());
        assert!(config.validate_for(false, true).is_err());

        let config = test_parse_config(
            "[site]\nurl = \"https://agency.example.com\"\n[content]\norigin = \"https://api.example.com\"",
        );
        assert!(config.validate_for(true, true).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = test_parse_config(
            "[content]\norigin = \"not a url\"\nexcerpt_length = 0\nwords_per_minute = 0",
        );
        let err = config.validate_for(true, true).unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        assert_eq!(diag.len(), 4);
    }

    #[test]
    fn test_pipeline() {
        let config = test_parse_config("[content]\norigin = \"https://api.example.com/\"");
        let pipeline = config.pipeline().unwrap();
        assert_eq!(pipeline.origin().as_str(), "https://api.example.com");
        assert_eq!(pipeline.options().blog_alt, "Blog image");

        assert!(SiteConfig::default().pipeline().is_err());
    }
}

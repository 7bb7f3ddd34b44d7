//! Sitemap command implementation.

use anyhow::Result;

use super::args::SitemapArgs;
use crate::config::SiteConfig;
use crate::generator::sitemap::build_sitemap;

/// Execute sitemap command
///
/// `sitemap.path` resolves against the config file's directory;
/// `--output` and `--data-dir` are taken as given.
pub fn run_sitemap(args: &SitemapArgs, config: &SiteConfig) -> Result<()> {
    let sitemap = build_sitemap(config, &args.data_dir)?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => config.root_join(&config.sitemap.path),
    };
    let minify = args.minify.unwrap_or(config.sitemap.minify);

    sitemap.write(&output, minify)
}

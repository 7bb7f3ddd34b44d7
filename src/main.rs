//! Folio - rich-content rendering tools for content API payloads.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use folio::cli::{self, Cli, Commands};
use folio::config::SiteConfig;
use folio::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Process { args } => cli::process::run_process(args, &config.pipeline()?),
        Commands::Meta { args } => cli::meta::run_meta(args, &config.pipeline()?),
        Commands::Sitemap { args } => cli::sitemap::run_sitemap(args, &config),
    }
}

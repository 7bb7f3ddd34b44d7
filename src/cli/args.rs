//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::content::ContentKind;

/// Rich-content rendering tools for content API payloads
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file name, searched upward from the working directory
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Content server origin, overrides `content.origin` and FOLIO_CONTENT_ORIGIN
    #[arg(long, global = true, value_hint = clap::ValueHint::Url)]
    pub origin: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite asset URLs and add image hints to one HTML fragment
    #[command(visible_alias = "p")]
    Process {
        #[command(flatten)]
        args: ProcessArgs,
    },

    /// Extract reading time, outline and excerpt as JSON
    #[command(visible_alias = "m")]
    Meta {
        #[command(flatten)]
        args: MetaArgs,
    },

    /// Generate sitemap.xml from static routes and collection listings
    #[command(visible_alias = "s")]
    Sitemap {
        #[command(flatten)]
        args: SitemapArgs,
    },
}

/// Page family of a processed fragment.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindArg {
    /// Blog post body
    #[default]
    Blog,
    /// Portfolio overview or solution description
    Overview,
    /// Alias of `overview`
    Portfolio,
    /// Alias of `overview`
    Solution,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Blog => ContentKind::Blog,
            KindArg::Overview | KindArg::Portfolio | KindArg::Solution => ContentKind::Overview,
        }
    }
}

/// Process command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ProcessArgs {
    /// HTML or JSON envelope to process, `-` for stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Content kind, selects the default alt text
    #[arg(short, long, value_enum, default_value_t = KindArg::Blog)]
    pub kind: KindArg,

    /// HTML field of the envelope's `data` object (default: content)
    #[arg(short, long)]
    pub field: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Meta command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct MetaArgs {
    /// HTML files or JSON envelopes, `-` for stdin
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// HTML field of the envelope's `data` object (default: content)
    #[arg(short, long)]
    pub field: Option<String>,

    /// Filter output to specific keys (comma-separated, e.g. readingTime,excerpt)
    #[arg(short, long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Sitemap command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SitemapArgs {
    /// Directory holding `<collection>.json` listings
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: PathBuf,

    /// Output path, `-` for stdout (default: `sitemap.path`)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Minify the XML output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

impl Cli {
    pub const fn is_process(&self) -> bool {
        matches!(self.command, Commands::Process { .. })
    }
    pub const fn is_meta(&self) -> bool {
        matches!(self.command, Commands::Meta { .. })
    }
    pub const fn is_sitemap(&self) -> bool {
        matches!(self.command, Commands::Sitemap { .. })
    }

    /// Whether the command runs the content pipeline.
    pub const fn needs_origin(&self) -> bool {
        self.is_process() || self.is_meta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::parse_from([
            "folio", "--origin", "https://api.example.com", "process", "-k", "portfolio", "-f",
            "overview", "post.json",
        ]);
        assert!(cli.needs_origin());
        assert_eq!(cli.origin.as_deref(), Some("https://api.example.com"));
        let Commands::Process { args } = cli.command else {
            panic!("expected process");
        };
        assert_eq!(ContentKind::from(args.kind), ContentKind::Overview);
        assert_eq!(args.field.as_deref(), Some("overview"));
        assert_eq!(args.path, PathBuf::from("post.json"));
    }

    #[test]
    fn test_parse_meta() {
        let cli = Cli::parse_from(["folio", "meta", "-p", "-s", "readingTime,excerpt", "a.html", "b.html"]);
        let Commands::Meta { args } = cli.command else {
            panic!("expected meta");
        };
        assert!(args.pretty);
        assert_eq!(args.paths.len(), 2);
        assert_eq!(
            args.select,
            Some(vec!["readingTime".to_string(), "excerpt".to_string()])
        );
    }

    #[test]
    fn test_parse_sitemap_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["folio", "sitemap", "-d", "data", "-v", "-C", "site.toml"]);
        assert!(cli.is_sitemap());
        assert!(!cli.needs_origin());
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        let Commands::Sitemap { args } = cli.command else {
            panic!("expected sitemap");
        };
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert_eq!(args.minify, None);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ContentKind::from(KindArg::Blog), ContentKind::Blog);
        assert_eq!(ContentKind::from(KindArg::Solution), ContentKind::Overview);
    }
}

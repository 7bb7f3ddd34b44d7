//! Command-line interface module.

mod args;
pub mod input;
pub mod meta;
pub mod process;
pub mod sitemap;

pub use args::{Cli, Commands, KindArg, MetaArgs, ProcessArgs, SitemapArgs};

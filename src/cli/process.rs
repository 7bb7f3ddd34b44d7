//! Process command implementation.
//!
//! Runs one fragment through the rendering pipeline and prints the
//! render-ready HTML.

use anyhow::Result;

use super::args::ProcessArgs;
use super::input::{read_html, write_output};
use crate::content::{ContentKind, Pipeline};
use crate::debug;

/// Execute process command
pub fn run_process(args: &ProcessArgs, pipeline: &Pipeline) -> Result<()> {
    let raw = read_html(&args.path, args.field.as_deref())?;
    let kind = ContentKind::from(args.kind);

    debug!("process"; "{} as {:?} ({} bytes)", args.path.display(), kind, raw.len());
    let html = pipeline.process(&raw, kind);

    write_output(args.output.as_deref(), &html, "process")
}

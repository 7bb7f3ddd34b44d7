//! Command input and output.
//!
//! Inputs are HTML fragments or content API envelopes, read from a file or
//! from stdin when the path is `-`. A path ending in `.json`, or any input
//! combined with `--field`, is treated as an envelope.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::{DEFAULT_FIELD, html_field};
use crate::log;

/// Whether `path` means stdin/stdout.
#[inline]
pub fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read the whole input.
pub fn read_source(path: &Path) -> Result<String> {
    if is_stdio(path) {
        io::read_to_string(io::stdin()).context("Failed to read stdin")
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Whether the input should be read as a `{ "data": ... }` envelope.
pub fn is_envelope(path: &Path, field: Option<&str>) -> bool {
    field.is_some()
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Raw HTML of one input.
pub fn read_html(path: &Path, field: Option<&str>) -> Result<String> {
    let source = read_source(path)?;
    if !is_envelope(path, field) {
        return Ok(source);
    }

    let field = field.unwrap_or(DEFAULT_FIELD);
    html_field(&source, field)
        .with_context(|| format!("Failed to extract `{field}` from {}", path.display()))
}

/// Write `text` to `output`, or stdout when unset or `-`.
pub fn write_output(output: Option<&Path>, text: &str, module: &str) -> Result<()> {
    match output.filter(|path| !is_stdio(path)) {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            writeln!(file, "{text}")?;
            log!(module; "wrote output to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

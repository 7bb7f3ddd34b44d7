//! Meta command implementation.
//!
//! Extracts content metadata from many inputs in parallel. Results keep
//! the order of the input paths.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::args::MetaArgs;
use super::input::{read_html, write_output};
use crate::content::{ContentMetadata, Pipeline};
use crate::log;
use crate::utils::plural_count;

/// Metadata of one input
#[derive(Debug, Serialize)]
pub struct MetaResult {
    pub path: String,
    #[serde(flatten)]
    pub metadata: ContentMetadata,
}

/// Execute meta command
pub fn run_meta(args: &MetaArgs, pipeline: &Pipeline) -> Result<()> {
    log!("meta"; "reading {}", plural_count(args.paths.len(), "input"));

    let (results, failed) = extract_all(&args.paths, args.field.as_deref(), pipeline);
    if results.is_empty() && failed > 0 {
        bail!("no metadata extracted, {} failed", plural_count(failed, "input"));
    }

    let output = match &args.select {
        Some(keys) => select_keys(&results, keys)?,
        None => serde_json::to_value(&results)?,
    };
    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    write_output(args.output.as_deref(), &formatted, "meta")
}

/// Extract metadata for every path, returning the successes in input
/// order and the number of failures.
fn extract_all(
    paths: &[PathBuf],
    field: Option<&str>,
    pipeline: &Pipeline,
) -> (Vec<MetaResult>, usize) {
    let outcomes: Vec<Option<MetaResult>> = paths
        .par_iter()
        .map(|path| match extract_one(path, field, pipeline) {
            Ok(result) => Some(result),
            Err(e) => {
                log!("warning"; "skipping {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    let total = outcomes.len();
    let results: Vec<MetaResult> = outcomes.into_iter().flatten().collect();
    let failed = total - results.len();
    (results, failed)
}

fn extract_one(path: &Path, field: Option<&str>, pipeline: &Pipeline) -> Result<MetaResult> {
    let raw = read_html(path, field)?;
    Ok(MetaResult {
        path: path.display().to_string(),
        metadata: pipeline.extract_metadata(&raw),
    })
}

/// Keep only the requested metadata keys; `path` always comes first.
fn select_keys(results: &[MetaResult], keys: &[String]) -> Result<JsonValue> {
    let items = results
        .iter()
        .map(|result| -> Result<JsonValue> {
            let mut obj = Map::new();
            obj.insert("path".to_string(), JsonValue::String(result.path.clone()));

            let meta_value = serde_json::to_value(&result.metadata)?;
            for key in keys {
                let value = meta_value.get(key).cloned().unwrap_or(JsonValue::Null);
                obj.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(obj))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(JsonValue::Array(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentOptions, ContentOrigin};
    use std::fs;
    use tempfile::TempDir;

    fn pipeline() -> Pipeline {
        Pipeline::new(
            ContentOrigin::parse("https://api.example.com").unwrap(),
            ContentOptions::default(),
        )
    }

    fn write_inputs(dir: &TempDir) -> Vec<PathBuf> {
        let files = [
            ("a.html", "<h1>First</h1><p>One two three.</p>".to_string()),
            ("b.json", r#"{"data": {"content": "<p>Hello world</p><img src=\"x.jpg\">"}}"#.to_string()),
            ("c.html", format!("<p>{}</p>", vec!["word"; 401].join(" "))),
        ];
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_extract_all_keeps_order() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(&dir);

        let (results, failed) = extract_all(&paths, None, &pipeline());
        assert_eq!(failed, 0);
        assert_eq!(results.len(), 3);
        assert!(results[0].path.ends_with("a.html"));
        assert_eq!(results[0].metadata.headings[0].id, "first");
        assert_eq!(
            results[1].metadata.first_image_url.as_deref(),
            Some("https://api.example.com/x.jpg")
        );
        assert_eq!(results[2].metadata.reading_time, "3 min read");
    }

    #[test]
    fn test_extract_all_skips_failures() {
        let dir = TempDir::new().unwrap();
        let mut paths = write_inputs(&dir);
        paths.insert(1, dir.path().join("missing.html"));

        let (results, failed) = extract_all(&paths, None, &pipeline());
        assert_eq!(failed, 1);
        assert_eq!(results.len(), 3);
        assert!(results[1].path.ends_with("b.json"));
    }

    #[test]
    fn test_result_json_shape() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(&dir);
        let (results, _) = extract_all(&paths[..1], None, &pipeline());

        let json = serde_json::to_value(&results).unwrap();
        let first = &json[0];
        assert!(first["path"].as_str().unwrap().ends_with("a.html"));
        assert_eq!(first["wordCount"], 4);
        assert_eq!(first["readingTime"], "1 min read");
        assert_eq!(first["excerpt"], "First One two three.");
    }

    #[test]
    fn test_select_keys() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(&dir);
        let (results, _) = extract_all(&paths, None, &pipeline());

        let selected = select_keys(&results, &["readingTime".into(), "unknown".into()]).unwrap();
        let first = selected[0].as_object().unwrap();
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        assert_eq!(keys, ["path", "readingTime", "unknown"]);
        assert_eq!(first["unknown"], JsonValue::Null);
    }

    #[test]
    fn test_run_meta_writes_file() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(&dir);
        let output = dir.path().join("meta.json");

        let args = MetaArgs {
            paths,
            field: None,
            select: Some(vec!["wordCount".into()]),
            pretty: false,
            output: Some(output.clone()),
        };
        run_meta(&args, &pipeline()).unwrap();

        let written: JsonValue =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 3);
        assert_eq!(written[2]["wordCount"], 401);
    }

    #[test]
    fn test_run_meta_all_failed() {
        let dir = TempDir::new().unwrap();
        let args = MetaArgs {
            paths: vec![dir.path().join("missing.html")],
            field: None,
            select: None,
            pretty: true,
            output: None,
        };
        assert!(run_meta(&args, &pipeline()).is_err());
    }
}

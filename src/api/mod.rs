//! Content API payloads.
//!
//! The content API wraps every response in `{ "data": ... }`. Detail
//! endpoints return one object whose HTML lives in a named field
//! (`content` for blog posts, `overview` for portfolio items,
//! `description` for solutions). Listing endpoints return an array of
//! items carrying at least a `slug`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Field holding the HTML body when none is requested.
pub const DEFAULT_FIELD: &str = "content";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid content API payload")]
    Json(#[from] serde_json::Error),

    #[error("field `{0}` not found in `data`")]
    MissingField(String),

    #[error("field `{0}` is not a string")]
    NotString(String),
}

/// `{ "data": T }` response wrapper.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One entry of a collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionItem {
    pub slug: String,
    /// Last modification time, used as sitemap `lastmod`.
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Parse a `{ "data": T }` envelope.
pub fn parse_envelope<T: DeserializeOwned>(json: &str) -> Result<Envelope<T>, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Items of a collection listing, skipping entries without a slug.
pub fn parse_collection(json: &str) -> Result<Vec<CollectionItem>, ApiError> {
    let envelope: Envelope<Vec<CollectionItem>> = parse_envelope(json)?;
    Ok(envelope
        .data
        .into_iter()
        .filter(|item| !item.slug.trim().is_empty())
        .collect())
}

/// HTML string stored in `data.<field>`.
///
/// A `null` field is an empty body, matching how the API reports
/// entries nobody has written yet.
pub fn html_field(json: &str, field: &str) -> Result<String, ApiError> {
    let envelope: Envelope<JsonValue> = parse_envelope(json)?;
    match envelope.data.get(field) {
        Some(JsonValue::String(html)) => Ok(html.clone()),
        Some(JsonValue::Null) => Ok(String::new()),
        Some(_) => Err(ApiError::NotString(field.to_string())),
        None => Err(ApiError::MissingField(field.to_string())),
    }
}

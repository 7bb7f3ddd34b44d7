//! Content server origin used to absolutize asset paths.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid content origin `{0}`")]
    Parse(String, #[source] url::ParseError),

    #[error("content origin `{0}` must use http or https")]
    Scheme(String),

    #[error("content origin `{0}` has no host")]
    MissingHost(String),
}

/// Validated absolute base URL of the asset host, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentOrigin(String);

impl ContentOrigin {
    /// Parse and validate an origin such as `https://api.example.com`.
    pub fn parse(input: &str) -> Result<Self, OriginError> {
        let trimmed = input.trim().trim_end_matches('/');
        let parsed =
            url::Url::parse(trimmed).map_err(|e| OriginError::Parse(trimmed.to_string(), e))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OriginError::Scheme(trimmed.to_string()));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(OriginError::MissingHost(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an asset reference against this origin.
    ///
    /// Absolute `http(s)` references are returned unchanged.
    pub fn resolve<'a>(&self, src: &'a str) -> Cow<'a, str> {
        if is_absolute(src) {
            Cow::Borrowed(src)
        } else {
            Cow::Owned(format!("{}{}", self.0, normalize_asset_path(src)))
        }
    }
}

impl fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `src` already carries an `http://` or `https://` scheme.
#[inline]
pub fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Normalize a relative asset path to a root-relative one.
///
/// Leading `../` segments are dropped, then a leading `/` is ensured.
///
/// ```text
/// ../../media/a.jpg -> /media/a.jpg
/// media/a.jpg       -> /media/a.jpg
/// /media/a.jpg      -> /media/a.jpg
/// ```
pub fn normalize_asset_path(src: &str) -> Cow<'_, str> {
    let mut rest = src;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }

    if rest.starts_with('/') {
        Cow::Borrowed(rest)
    } else {
        Cow::Owned(format!("/{rest}"))
    }
}

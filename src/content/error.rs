//! Content processing errors and the fail-open policy.

use thiserror::Error;

/// Editor content that cannot be parsed safely.
///
/// Never crosses the pipeline boundary: public transforms degrade to
/// their documented fallback through [`FailOpen`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unclosed <{name}> tag at byte {offset}")]
    UnclosedTag { name: String, offset: usize },

    #[error("unclosed comment at byte {offset}")]
    UnclosedComment { offset: usize },

    #[error("missing </{name}> for raw text opened at byte {offset}")]
    UnclosedRawText { name: String, offset: usize },

    #[error("fragment of {len} bytes is too large to parse")]
    TooLarge { len: usize },
}

/// Degrade a failed content operation to a fallback value.
pub trait FailOpen<T> {
    /// Return the value, or log the error and return `fallback()`.
    fn fail_open(self, operation: &str, fallback: impl FnOnce() -> T) -> T;
}

impl<T> FailOpen<T> for Result<T, ContentError> {
    fn fail_open(self, operation: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                crate::log!("content"; "{operation}: {err}, using fallback");
                fallback()
            }
        }
    }
}

//! Reading time estimate.

/// Default reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Reading time for blank content.
pub const READING_TIME_EMPTY: &str = "1 min read";

/// Reading time when the content cannot be processed.
pub const READING_TIME_FALLBACK: &str = "5 min read";

/// Minutes needed for `words`, rounded up, never below one.
#[inline]
pub fn minutes_for(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Display form, e.g. `3 min read`.
#[inline]
pub fn format_reading_time(minutes: usize) -> String {
    format!("{minutes} min read")
}

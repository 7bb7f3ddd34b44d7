//! Sentence-aware excerpts for previews and meta descriptions.

/// Default excerpt length in characters.
pub const EXCERPT_LENGTH: usize = 160;

const ELLIPSIS: &str = "...";

/// Truncate plain text to roughly `max_length` characters.
///
/// Prefers ending on a sentence terminator in the last 30% of the window,
/// then on a word boundary in the last 20%, otherwise cuts hard. The
/// result is at most `max_length + 3` characters long.
pub fn truncate_excerpt(text: &str, max_length: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_length) else {
        return text.to_string();
    };
    let window = &text[..cut];

    if let Some((pos, c)) = window
        .char_indices()
        .rev()
        .find(|(_, c)| matches!(c, '.' | '!' | '?'))
        && char_position(window, pos) * 10 >= max_length * 7
    {
        return window[..pos + c.len_utf8()].to_string();
    }

    if let Some(pos) = window.rfind(' ')
        && char_position(window, pos) * 10 >= max_length * 8
    {
        return format!("{}{ELLIPSIS}", &window[..pos]);
    }

    format!("{window}{ELLIPSIS}")
}

/// Character index of byte offset `pos`.
#[inline]
fn char_position(text: &str, pos: usize) -> usize {
    text[..pos].chars().count()
}

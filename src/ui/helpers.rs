//! Shared rendering utilities and helpers.
//!
//! Backend text (subjects, bodies, post contents, user names) is always shown as
//! text. Escape and other control characters are stripped before anything
//! reaches the terminal, so a subject can never move the cursor or recolor
//! the screen.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::ui::helpers::{sanitize_inline, truncate};
//!
//! assert_eq!(sanitize_inline("Hi\u{1b}[31m\nthere"), "Hi[31m there");
//! assert_eq!(truncate("abcdefgh", 6), "abc...");
//! ```

/// Strips control characters from single-line text.
///
/// Line breaks and tabs become a single space; every other control character is
/// dropped.
#[must_use]
pub fn sanitize_inline(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Strips control characters from multi-line text, keeping line breaks.
///
/// `\r\n` is normalized to `\n` and tabs become four spaces.
#[must_use]
pub fn sanitize_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Number of characters in `text`.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if visual_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let padding = width.saturating_sub(visual_len(&cut));
    format!("{cut}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_loses_escape_sequences_and_newlines() {
        assert_eq!(sanitize_inline("\u{1b}]0;pwned\u{7}title"), "]0;pwnedtitle");
        assert_eq!(sanitize_inline("a\r\nb"), "a  b");
    }

    #[test]
    fn block_text_keeps_line_breaks() {
        assert_eq!(sanitize_block("one\r\ntwo\u{0}\tx"), "one\ntwo    x");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("♡♡♡♡♡♡", 5), "♡♡...");
    }
}

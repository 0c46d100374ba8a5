use unicode_width::UnicodeWidthChar;

/// Replacement drawn for control characters (tabs, embedded newlines, ...)
pub const CONTROL_PLACEHOLDER: char = '?';

/// Number of terminal cells a single character occupies.
/// Control characters are drawn as a placeholder and therefore take one cell.
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Character actually written to the screen for `c`
pub fn drawable(c: char) -> char {
    if c.is_control() {
        CONTROL_PLACEHOLDER
    } else {
        c
    }
}

/// Display width of a string: the sum of its characters' cell widths
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` whose display width does not exceed `max_width`.
///
/// A wide character that would straddle the limit is dropped entirely, so the
/// result can be narrower than `max_width`. Zero-width characters directly
/// following the last fitting character are kept with it.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

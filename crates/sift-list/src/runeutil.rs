//! Display-width helpers for fitting text into terminal columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The tail appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending `tail` when cut.
///
/// The result, tail included, never exceeds `max_width` columns.
///
/// ```
/// use sift_list::runeutil::truncate;
///
/// assert_eq!(truncate("hello world", 8, "..."), "hello...");
/// assert_eq!(truncate("hi", 10, "..."), "hi");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_columns(tail, max_width).0.to_string();
    }
    let (head, _) = take_columns(s, max_width - tail_width);
    format!("{head}{tail}")
}

/// Longest prefix of `s` that fits in `max_width` columns, and its char count.
pub fn take_columns(s: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut chars = 0;
    for (offset, c) in s.char_indices() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            return (&s[..offset], chars);
        }
        width += cw;
        chars += 1;
    }
    (s, chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("abc"), 3);
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate("日本語テキスト", 7, ELLIPSIS), "日本語…");
    }

    #[test]
    fn truncate_with_oversized_tail() {
        assert_eq!(truncate("abcdef", 2, "..."), "..");
    }

    #[test]
    fn take_columns_counts_chars() {
        assert_eq!(take_columns("héllo", 3), ("hél", 3));
        assert_eq!(take_columns("ab", 10), ("ab", 2));
    }
}

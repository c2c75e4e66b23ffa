//! Char-offset helpers.
//!
//! Dataset offsets count chars, while Rust strings index by byte. These
//! helpers do the translation and return `None` for out-of-range offsets
//! instead of panicking.

/// Number of chars in `text`
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte position of the char at `char_idx`; `char_len(text)` maps to `text.len()`
#[must_use]
pub fn byte_offset(text: &str, char_idx: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(char_idx)
}

/// Slice `text[start..end]` with char offsets
#[must_use]
pub fn slice_chars(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = byte_offset(text, start)?;
    let to = from + byte_offset(&text[from..], end - start)?;
    Some(&text[from..to])
}

/// Split `text` into the parts before `start` and from `end` onwards
#[must_use]
pub fn split_around(text: &str, start: usize, end: usize) -> Option<(&str, &str)> {
    if start > end {
        return None;
    }
    let from = byte_offset(text, start)?;
    let to = from + byte_offset(&text[from..], end - start)?;
    Some((&text[..from], &text[to..]))
}

/// Replace the chars in `start..end` with `replacement`
#[must_use]
pub fn splice(text: &str, start: usize, end: usize, replacement: &str) -> Option<String> {
    let (prefix, suffix) = split_around(text, start, end)?;
    let mut out = String::with_capacity(prefix.len() + replacement.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(replacement);
    out.push_str(suffix);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offsets_follow_multibyte_chars() {
        let text = "añb";
        assert_eq!(byte_offset(text, 0), Some(0));
        assert_eq!(byte_offset(text, 1), Some(1));
        assert_eq!(byte_offset(text, 2), Some(3));
        assert_eq!(byte_offset(text, 3), Some(4));
        assert_eq!(byte_offset(text, 4), None);
    }

    #[test]
    fn slice_by_chars() {
        let text = "λx. f(x)";
        assert_eq!(slice_chars(text, 0, 2), Some("λx"));
        assert_eq!(slice_chars(text, 4, 8), Some("f(x)"));
        assert_eq!(slice_chars(text, 8, 8), Some(""));
        assert_eq!(slice_chars(text, 3, 2), None);
        assert_eq!(slice_chars(text, 0, 9), None);
    }

    #[test]
    fn splice_replaces_span() {
        assert_eq!(
            splice("let x = 1;", 8, 9, "42").as_deref(),
            Some("let x = 42;")
        );
        assert_eq!(splice("ab", 2, 2, "c").as_deref(), Some("abc"));
        assert_eq!(splice("ab", 1, 3, "c"), None);
    }

    #[test]
    fn split_around_keeps_both_sides() {
        assert_eq!(split_around("foo(bar)", 4, 7), Some(("foo(", ")")));
    }
}

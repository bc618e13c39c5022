//! Small text helpers shared by the renderer and the document envelope.

/// Byte order mark, treated as whitespace when trimming
const BOM: char = '\u{feff}';

/// NEXT LINE is Unicode White_Space but not ECMAScript whitespace; trimming
/// keeps it
const NEL: char = '\u{85}';

fn is_trim_char(c: char) -> bool {
    (c.is_whitespace() && c != NEL) || c == BOM
}

/// Trim leading and trailing whitespace, including a stray BOM but not NEL
pub fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(is_trim_char)
}

/// True when the string is empty after trimming
pub fn is_blank(s: &str) -> bool {
    trim_whitespace(s).is_empty()
}

/// Truncate to at most `max_chars` characters, never splitting a character
pub fn preview(markdown: &str, max_chars: usize) -> &str {
    match markdown.char_indices().nth(max_chars) {
        Some((idx, _)) => &markdown[..idx],
        None => markdown,
    }
}

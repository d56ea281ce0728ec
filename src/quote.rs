//! String literal quoting.
//!
//! [`quote`] wraps a string in double quotes and escapes every character in
//! the range U+0000..=U+001F together with `"` and `\`. The short escapes are
//! `\b \t \n \f \r \" \\`; the remaining control characters use `\u00XX` with
//! lowercase hex digits. Everything else, including non-ASCII text and U+007F,
//! is copied through unchanged.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Returns the escape sequence for `ch`, or `None` if it is copied verbatim.
#[inline]
fn short_escape(ch: char) -> Option<&'static str> {
    match ch {
        '\u{0008}' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\u{000C}' => Some("\\f"),
        '\r' => Some("\\r"),
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        _ => None,
    }
}

#[inline]
fn needs_escape(ch: char) -> bool {
    ch < ' ' || ch == '"' || ch == '\\'
}

/// Double-quotes `value`, escaping control characters, quotes and backslashes.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::quote;
///
/// assert_eq!(quote("plain"), "\"plain\"");
/// assert_eq!(quote("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
/// assert_eq!(quote("\u{1}"), r#""\u0001""#);
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    write_quoted(&mut output, value);
    output
}

/// Appends the quoted form of `value` to `output`.
pub(crate) fn write_quoted(output: &mut String, value: &str) {
    output.push('"');
    if !value.chars().any(needs_escape) {
        output.push_str(value);
        output.push('"');
        return;
    }

    for ch in value.chars() {
        if !needs_escape(ch) {
            output.push(ch);
        } else if let Some(escaped) = short_escape(ch) {
            output.push_str(escaped);
        } else {
            let code = ch as usize;
            output.push_str("\\u00");
            output.push(HEX_DIGITS[code >> 4] as char);
            output.push(HEX_DIGITS[code & 0xf] as char);
        }
    }
    output.push('"');
}

//! Python literal rendering.

use std::fmt::Write as _;

/// Renders `value` as a Python string literal.
///
/// Double quotes are used unless the value contains a double quote and no
/// single quote, so `a[data-x="1"]` renders as `'a[data-x="1"]'`.
#[must_use]
pub fn py_str(value: &str) -> String {
    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Renders a Python list of string literals.
#[must_use]
pub fn py_list(items: &[&str]) -> String {
    let rendered: Vec<String> = items.iter().map(|item| py_str(item)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Flattens free text so it fits on one comment line.
pub(crate) fn comment_safe(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_selector_is_double_quoted() {
        assert_eq!(py_str("div.item"), "\"div.item\"");
    }

    #[test]
    fn test_quote_choice() {
        assert_eq!(py_str(r#"a[data-x="1"]"#), r#"'a[data-x="1"]'"#);
        assert_eq!(py_str(r#"it's "x""#), r#""it's \"x\"""#);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(py_str("a\\b\nc\td"), "\"a\\\\b\\nc\\td\"");
        assert_eq!(py_str("\u{7}"), "\"\\x07\"");
        assert_eq!(py_str("café"), "\"café\"");
    }

    #[test]
    fn test_list_and_comment() {
        assert_eq!(py_list(&["a", "b"]), "[\"a\", \"b\"]");
        assert_eq!(py_list(&[]), "[]");
        assert_eq!(comment_safe("one\r\n two \n"), "one two");
    }
}

//! Descriptor to CSS selector compilation.
//!
//! A descriptor is a tag plus a loose attrs string such as
//! `id=main, class="card featured" data-role='list'`. The attrs grammar:
//!
//! ```text
//! attrs   := sep* (pair sep*)*
//! sep     := whitespace | ','
//! pair    := key ws* '=' ws* value
//! key     := [A-Za-z0-9_-]+
//! value   := '"' [^"]* '"' | "'" [^']* "'" | [^\s,]*
//! ```
//!
//! Pairs are emitted in scan order:
//! - `id` appends `#` and the first whitespace-delimited token of the value.
//! - `class` appends `.token` for every non-empty whitespace-separated token.
//! - Any other key appends `[key="value"]` with `"` escaped as `\"`.
//!
//! Key matching for `id`/`class` ignores ASCII case.

use tracing::debug;

use crate::errors::AttrsSyntaxError;

/// Selector returned when a descriptor cannot be compiled.
///
/// It is valid CSS that matches no element, so callers that run it anyway get
/// a zero-match result instead of a failure.
pub const INVALID_SELECTOR: &str = ":not(*)";

/// One `key=value` occurrence from an attrs string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPair {
    /// The key as written.
    pub key: String,
    /// The unquoted value.
    pub value: String,
}

impl AttrPair {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Splits an attrs string into its `key=value` pairs, left to right.
pub fn tokenize_attrs(attrs: &str) -> Result<Vec<AttrPair>, AttrsSyntaxError> {
    let mut cursor = Cursor::new(attrs);
    let mut pairs = Vec::new();

    loop {
        cursor.eat_while(is_separator);
        let Some(c) = cursor.peek() else {
            break;
        };

        if c == '=' {
            return Err(AttrsSyntaxError::EmptyKey { offset: cursor.pos });
        }
        if !is_key_char(c) {
            return Err(AttrsSyntaxError::UnexpectedChar {
                found: c,
                offset: cursor.pos,
            });
        }

        let key = cursor.eat_while(is_key_char);
        cursor.eat_while(char::is_whitespace);
        if cursor.peek() != Some('=') {
            return Err(AttrsSyntaxError::MissingEquals {
                key: key.to_string(),
                offset: cursor.pos,
            });
        }
        cursor.bump();
        cursor.eat_while(char::is_whitespace);

        let value = match cursor.peek() {
            Some(quote @ ('"' | '\'')) => {
                let open = cursor.pos;
                cursor.bump();
                let rest = &attrs[cursor.pos..];
                let Some(len) = rest.find(quote) else {
                    return Err(AttrsSyntaxError::UnterminatedQuote {
                        quote,
                        offset: open,
                    });
                };
                let value = &rest[..len];
                cursor.pos += len + quote.len_utf8();
                value
            }
            _ => cursor.eat_while(|c| !is_separator(c)),
        };

        pairs.push(AttrPair::new(key, value));
    }

    Ok(pairs)
}

/// Compiles a descriptor, reporting tokenizer and emission failures.
pub fn try_compile(tag: &str, attrs: &str) -> Result<String, AttrsSyntaxError> {
    let mut selector = tag.trim().to_string();
    if attrs.trim().is_empty() {
        return Ok(selector);
    }

    for pair in tokenize_attrs(attrs)? {
        if pair.key.eq_ignore_ascii_case("id") {
            // Multi-token ids keep only their first token.
            let Some(first) = pair.value.split_whitespace().next() else {
                return Err(AttrsSyntaxError::EmptyValue { key: pair.key });
            };
            selector.push('#');
            selector.push_str(first);
        } else if pair.key.eq_ignore_ascii_case("class") {
            let classes: Vec<&str> = pair.value.split_whitespace().collect();
            if !classes.is_empty() {
                selector.push('.');
                selector.push_str(&classes.join("."));
            }
        } else {
            selector.push_str(&format!(
                "[{}=\"{}\"]",
                pair.key,
                pair.value.replace('"', "\\\"")
            ));
        }
    }

    Ok(selector)
}

/// Compiles a `(tag, attrs)` descriptor into a CSS selector.
///
/// Never fails: a descriptor that cannot be compiled yields
/// [`INVALID_SELECTOR`].
#[must_use]
pub fn compile(tag: &str, attrs: &str) -> String {
    match try_compile(tag, attrs) {
        Ok(selector) => selector,
        Err(err) => {
            debug!(tag, attrs, error = %err, "descriptor did not compile");
            INVALID_SELECTOR.to_string()
        }
    }
}

//! Tokenizer for `key=value;key=value` text.
//!
//! Grammar:
//! - pairs are separated by `;`, empty segments are skipped
//! - the first `=` not doubled separates key and value; `==` in a key is a
//!   literal `=`
//! - a value may be wrapped in `'` or `"`; the wrapping quote is escaped by
//!   doubling it
//! - keys and unquoted values are trimmed
//!
//! All delimiters are ASCII, so every slice boundary below falls on a char
//! boundary.

use crate::error::MalformedGrammarError;
use crate::tokens::ConnectionTokens;

/// Tokenize connection-string text.
///
/// Later duplicates overwrite earlier values. A segment without `=` is kept
/// as a key with an empty value so it survives re-rendering.
///
/// # Examples
///
/// ```
/// use xrm_connection_grammar::parse_tokens;
///
/// let tokens = parse_tokens("Url=https://x; Password='a;b'")?;
/// assert_eq!(tokens.get("url"), Some("https://x"));
/// assert_eq!(tokens.get("password"), Some("a;b"));
/// # Ok::<(), xrm_connection_grammar::MalformedGrammarError>(())
/// ```
pub fn parse_tokens(text: &str) -> Result<ConnectionTokens, MalformedGrammarError> {
    let mut tokens = ConnectionTokens::new();
    let mut cursor = Cursor { text, pos: 0 };

    while !cursor.at_end() {
        let (raw_key, has_value) = cursor.read_key();
        let key = raw_key.trim();

        if !has_value {
            if !key.is_empty() {
                tokens.insert(key, "");
            }
            continue;
        }

        let value = cursor.read_value(key)?;
        if key.is_empty() {
            tracing::debug!(
                position = cursor.pos,
                "skipping connection string segment with an empty key"
            );
            continue;
        }
        tokens.insert(key, value);
    }

    Ok(tokens)
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn rest(&self) -> &str {
        self.text.get(self.pos..).unwrap_or_default()
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or_default()
    }

    /// Read up to the separating `=`. Returns the unescaped key and whether a
    /// value follows. Consumes a terminating `;` when the segment has no `=`.
    fn read_key(&mut self) -> (String, bool) {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut index = start;

        loop {
            match bytes.get(index) {
                None => {
                    self.pos = index;
                    return (unescape_key(self.slice(start, index)), false);
                },
                Some(b';') => {
                    self.pos = index + 1;
                    return (unescape_key(self.slice(start, index)), false);
                },
                Some(b'=') if bytes.get(index + 1) == Some(&b'=') => index += 2,
                Some(b'=') => {
                    self.pos = index + 1;
                    return (unescape_key(self.slice(start, index)), true);
                },
                Some(_) => index += 1,
            }
        }
    }

    /// Read a value and consume its terminating `;` (if any).
    fn read_value(&mut self, key: &str) -> Result<String, MalformedGrammarError> {
        let rest = self.rest();
        let leading = rest.len() - rest.trim_start().len();
        let value_start = self.pos + leading;

        let first = self.text.get(value_start..).and_then(|s| s.chars().next());
        match first {
            Some(quote @ ('\'' | '"')) => self.read_quoted(key, value_start, quote),
            _ => {
                let end = self.segment_end(self.pos);
                let value = self.slice(self.pos, end).trim().to_owned();
                self.pos = end + 1;
                Ok(value)
            },
        }
    }

    fn read_quoted(
        &mut self,
        key: &str,
        open: usize,
        quote: char,
    ) -> Result<String, MalformedGrammarError> {
        let mut value = String::new();
        let mut pos = open + 1;

        loop {
            let Some(offset) = self.text.get(pos..).and_then(|s| s.find(quote)) else {
                return Err(MalformedGrammarError::unterminated_quote(key, open));
            };
            value.push_str(self.slice(pos, pos + offset));
            pos += offset + 1;

            if self.text.get(pos..).is_some_and(|s| s.starts_with(quote)) {
                value.push(quote);
                pos += 1;
            } else {
                break;
            }
        }

        let end = self.segment_end(pos);
        let trailing = self.slice(pos, end).trim();
        if !trailing.is_empty() {
            tracing::debug!(
                key,
                position = pos,
                "appending text found after a closing quote"
            );
            value.push_str(trailing);
        }
        self.pos = end + 1;
        Ok(value)
    }

    fn segment_end(&self, from: usize) -> usize {
        self.text
            .get(from..)
            .and_then(|s| s.find(';'))
            .map_or(self.text.len(), |offset| from + offset)
    }
}

fn unescape_key(raw: &str) -> String {
    raw.replace("==", "=")
}

//! Rendering of key/value pairs back into connection-string text.
//!
//! Rendered text always re-tokenizes to the same values.

/// Render `key=value` with the minimal quoting the value needs.
#[must_use]
pub fn render_pair(key: &str, value: &str) -> String {
    format!("{}={}", escape_key(key), quote_value(value))
}

/// Render pairs joined by `;`.
pub fn render_tokens<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| render_pair(key, value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Quote a value when it contains a delimiter, a quote character, or
/// surrounding whitespace; otherwise return it unchanged.
#[must_use]
pub fn quote_value(value: &str) -> String {
    if !needs_quoting(value) {
        return value.to_owned();
    }

    if value.contains('"') && !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}

fn needs_quoting(value: &str) -> bool {
    value.contains([';', '=', '\'', '"'])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
}

fn escape_key(key: &str) -> String {
    key.replace('=', "==")
}

//! Ordered, ASCII case-insensitive key/value bag produced by the tokenizer.

use crate::render::render_pair;

/// A single `key=value` pair as it appeared in the text (key trimmed,
/// value unquoted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionToken {
    key: String,
    value: String,
}

impl ConnectionToken {
    /// Build a token from a key and raw value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Key spelling as first seen in the input.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw (unquoted) value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Insertion-ordered token set with ASCII case-insensitive keys.
///
/// Only ASCII letters are folded: `Ä` and `ä` are different keys.
///
/// Inserting a key that is already present replaces its value in place: the
/// entry keeps its original position and spelling, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionTokens {
    entries: Vec<ConnectionToken>,
}

impl ConnectionTokens {
    /// Create an empty token set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.value = value;
                }
            },
            None => self.entries.push(ConnectionToken { key, value }),
        }
    }

    /// Look up a value by key (ASCII case-insensitive).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
            .map(ConnectionToken::value)
    }

    /// Returns true when the key is present (ASCII case-insensitive).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove a key and return its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key)
            .map(|index| self.entries.remove(index).value)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionToken> {
        self.entries.iter()
    }

    /// Render the remaining tokens back into connection-string text.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| render_pair(&entry.key, &entry.value))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.key.eq_ignore_ascii_case(key))
    }
}

impl<K, V> FromIterator<(K, V)> for ConnectionTokens
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tokens = Self::new();
        for (key, value) in iter {
            tokens.insert(key, value);
        }
        tokens
    }
}

impl<'a> IntoIterator for &'a ConnectionTokens {
    type Item = &'a ConnectionToken;
    type IntoIter = std::slice::Iter<'a, ConnectionToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_ascii_case() {
        let tokens: ConnectionTokens = [("Service Uri", "https://x")].into_iter().collect();
        assert_eq!(tokens.get("service uri"), Some("https://x"));
        assert_eq!(tokens.get("SERVICE URI"), Some("https://x"));
        assert!(tokens.contains_key("Service URI"));
        assert!(tokens.get("ServiceUri").is_none());
    }

    #[test]
    fn non_ascii_letters_are_not_folded() {
        let tokens: ConnectionTokens = [("Äpfel", "1"), ("äpfel", "2"), ("ÄPFEL", "3")]
            .into_iter()
            .collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get("Äpfel"), Some("3"));
        assert_eq!(tokens.get("äPFEL"), Some("2"));
    }

    #[test]
    fn duplicate_insert_keeps_position_and_last_value() {
        let tokens: ConnectionTokens = [("A", "1"), ("B", "2"), ("a", "3")]
            .into_iter()
            .collect();

        let pairs: Vec<(&str, &str)> = tokens.iter().map(|t| (t.key(), t.value())).collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn remove_returns_value_and_drops_entry() {
        let mut tokens: ConnectionTokens = [("Foo", "bar"), ("Baz", "")].into_iter().collect();

        assert_eq!(tokens.remove("FOO").as_deref(), Some("bar"));
        assert_eq!(tokens.remove("foo"), None);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.render(), "Baz=");
    }
}

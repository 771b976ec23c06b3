//! # xrm-connection-grammar
//!
//! The generic `key=value;key=value` text form underneath XRM connection
//! strings: tokenizing (with quoting and escaping) and minimal-quoting
//! rendering. Knows nothing about which keys mean what.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod error;
pub mod parse;
pub mod render;
pub mod tokens;

pub use error::MalformedGrammarError;
pub use parse::parse_tokens;
pub use render::{quote_value, render_pair, render_tokens};
pub use tokens::{ConnectionToken, ConnectionTokens};

/// Returns the grammar crate version.
#[must_use]
pub const fn grammar_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn grammar_crate_compiles() {
        assert!(!grammar_crate_version().is_empty());
    }

    proptest! {
        #[test]
        fn rendered_pairs_tokenize_to_the_same_values(
            entries in prop::collection::btree_map(key_strategy(), "\\PC{0,24}", 0..6)
        ) {
            let pairs: Vec<(&str, &str)> = entries
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            let text = render_tokens(pairs.iter().copied());
            let tokens = parse_tokens(&text);
            prop_assert!(tokens.is_ok());
            if let Ok(tokens) = tokens {
                prop_assert_eq!(tokens.len(), pairs.len());
                for (key, value) in pairs {
                    prop_assert_eq!(tokens.get(key), Some(value));
                }
            }
        }
    }

    // Lowercase-only keys so the map never holds two keys that collide
    // case-insensitively.
    fn key_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9 =]{0,12}[a-z0-9]"
    }
}

//! Grammar-level failures.
//!
//! Only structural problems in the text are errors here. Values that parse
//! as text but fail later typed conversion are handled by the config crate.

use thiserror::Error;
use xrm_connection_shared::{ErrorCode, ErrorEnvelope};

/// A quoted value was opened but never closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated quoted value for key `{key}` (quote opened at byte {position})")]
pub struct MalformedGrammarError {
    /// Key whose value carried the unterminated quote.
    pub key: String,
    /// Byte offset of the opening quote in the input text.
    pub position: usize,
}

impl MalformedGrammarError {
    /// Build an error for the key whose quote opened at `position`.
    pub fn unterminated_quote(key: impl Into<String>, position: usize) -> Self {
        Self {
            key: key.into(),
            position,
        }
    }
}

impl From<MalformedGrammarError> for ErrorEnvelope {
    fn from(error: MalformedGrammarError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::unterminated_quote(), message)
            .with_metadata("key", error.key)
            .with_metadata("position", error.position.to_string())
    }
}

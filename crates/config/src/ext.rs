//! Method-style entry points on the connection record.

use crate::parse::parse_connection_string;
use crate::serialize::to_connection_string;
use xrm_connection_domain::ConnectionConfig;
use xrm_connection_grammar::MalformedGrammarError;

/// Connection-string codec as methods on [`ConnectionConfig`].
pub trait ConnectionStringExt: Sized {
    /// Parse a connection string.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGrammarError`] when a quoted value is never closed.
    fn from_connection_string(text: &str) -> Result<Self, MalformedGrammarError>;

    /// Render as a connection string.
    fn to_connection_string(&self) -> String;
}

impl ConnectionStringExt for ConnectionConfig {
    fn from_connection_string(text: &str) -> Result<Self, MalformedGrammarError> {
        parse_connection_string(text)
    }

    fn to_connection_string(&self) -> String {
        to_connection_string(Some(self))
    }
}

//! Error envelope types shared by every crate in the workspace.
//!
//! Crate-local error enums (grammar failures, discovery request failures)
//! convert into an [`ErrorEnvelope`] at the crate boundary so callers see a
//! single structured shape: kind, retry class, namespaced code, message and
//! string metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Expected failures (malformed input, missing required values).
    Expected,
    /// Unexpected failures raised by external collaborators.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Retry classification for failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorClass {
    /// The operation can be retried safely.
    Retriable,
    /// The operation should not be retried.
    NonRetriable,
}

impl ErrorClass {
    /// Returns true when the error is considered retriable.
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Retriable)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retriable => formatter.write_str("retriable"),
            Self::NonRetriable => formatter.write_str("non-retriable"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Invalid input code.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// Unterminated quoted value in connection-string text.
    pub fn unterminated_quote() -> Self {
        Self::new("grammar", "unterminated_quote")
    }

    /// Discovery was requested for a connection without a service URI.
    pub fn missing_service_uri() -> Self {
        Self::new("discovery", "missing_service_uri")
    }

    /// The discovery service could not be reached.
    pub fn discovery_unavailable() -> Self {
        Self::new("discovery", "unavailable")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Retry classification.
    pub class: ErrorClass,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error with non-retriable classification.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Expected, ErrorClass::NonRetriable, code, message)
    }

    /// Create an unexpected error with the provided retry classification.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>, class: ErrorClass) -> Self {
        Self::with_kind(ErrorKind::Unexpected, class, code, message)
    }

    fn with_kind(
        kind: ErrorKind,
        class: ErrorClass,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            class,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a single metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {} {}: {}",
            self.kind, self.class, self.code, self.message
        )
    }
}

impl std::error::Error for ErrorEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_envelope_constructors() {
        let expected = ErrorEnvelope::expected(ErrorCode::unterminated_quote(), "bad quote");
        assert_eq!(expected.kind, ErrorKind::Expected);
        assert_eq!(expected.class, ErrorClass::NonRetriable);
        assert_eq!(expected.code.namespace(), "grammar");

        let unexpected = ErrorEnvelope::unexpected(
            ErrorCode::discovery_unavailable(),
            "endpoint down",
            ErrorClass::Retriable,
        );
        assert_eq!(unexpected.kind, ErrorKind::Unexpected);
        assert!(unexpected.class.is_retriable());
    }

    #[test]
    fn display_includes_code_and_message() {
        let error = ErrorEnvelope::expected(ErrorCode::missing_service_uri(), "no service uri");
        assert_eq!(
            error.to_string(),
            "expected non-retriable discovery:missing_service_uri: no service uri"
        );
    }

    #[test]
    fn metadata_entries_accumulate() {
        let error = ErrorEnvelope::expected(ErrorCode::unterminated_quote(), "bad")
            .with_metadata("key", "Password")
            .with_metadata("position", "9");

        assert_eq!(error.metadata.get("key").map(String::as_str), Some("Password"));
        assert_eq!(error.metadata.len(), 2);
    }

    #[test]
    fn envelope_serializes_without_empty_metadata() -> Result<(), Box<dyn Error>> {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad");
        let json = serde_json::to_value(&error)?;

        assert_eq!(json["kind"], "expected");
        assert_eq!(json["class"], "nonRetriable");
        assert!(json.get("metadata").is_none());
        Ok(())
    }
}

//! Result alias for envelope-based error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for attaching diagnostics to envelope results.
pub trait ResultExt<T> {
    /// Attach a metadata entry to the error, preserving the success value.
    #[must_use]
    fn with_error_metadata(self, key: &str, value: &str) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_error_metadata(self, key: &str, value: &str) -> Self {
        self.map_err(|error| error.with_metadata(key, value))
    }
}

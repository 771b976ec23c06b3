//! Test fixtures for shared error codes and envelopes.

use xrm_connection_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Return the error codes the workspace raises.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::unterminated_quote(),
        ErrorCode::missing_service_uri(),
        ErrorCode::discovery_unavailable(),
    ]
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}

/// A retriable failure from an unreachable discovery service.
pub fn discovery_unavailable_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::discovery_unavailable(),
        "discovery service unavailable",
        ErrorClass::Retriable,
    )
}

//! Lenient conversion of extracted text into typed field values.
//!
//! Nothing here fails: a value that does not convert is dropped (or
//! defaulted) and reported through `tracing`.

use crate::keys::ConnectionKey;
use std::time::Duration;
use url::Url;
use xrm_connection_domain::{
    AuthenticationType, DEFAULT_TIMEOUT, LoginPrompt, parse_timespan,
};
use xrm_connection_shared::{SecretString, redact_if_secret};

/// Empty text is unset.
pub fn to_text(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}

/// Empty text is unset.
pub fn to_secret(raw: String) -> Option<SecretString> {
    to_text(raw).map(SecretString::from)
}

/// Parse an absolute URI; anything else is unset.
pub fn to_uri(key: ConnectionKey, raw: &str) -> Option<Url> {
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(uri) => Some(uri),
        Err(error) => {
            rejected(key, raw, &error.to_string());
            None
        },
    }
}

/// Parse a timeout literal, falling back to [`DEFAULT_TIMEOUT`].
pub fn to_timeout(raw: &str) -> Duration {
    if raw.is_empty() {
        return DEFAULT_TIMEOUT;
    }
    parse_timespan(raw).unwrap_or_else(|| {
        rejected(ConnectionKey::Timeout, raw, "not a time span");
        DEFAULT_TIMEOUT
    })
}

/// Parse a login prompt member name, falling back to `Auto`.
pub fn to_login_prompt(raw: &str) -> LoginPrompt {
    if raw.is_empty() {
        return LoginPrompt::default();
    }
    LoginPrompt::parse(raw).unwrap_or_else(|| {
        rejected(ConnectionKey::LoginPrompt, raw, "unknown member");
        LoginPrompt::default()
    })
}

/// Parse an authentication type member name; unknown names are unset.
pub fn to_authentication_type(raw: &str) -> Option<AuthenticationType> {
    if raw.is_empty() {
        return None;
    }
    let parsed = AuthenticationType::parse(raw);
    if parsed.is_none() {
        rejected(ConnectionKey::AuthenticationType, raw, "unknown member");
    }
    parsed
}

fn rejected(key: ConnectionKey, raw: &str, reason: &str) {
    tracing::debug!(
        field = key.field().name(),
        key = key.canonical_key(),
        value = %redact_if_secret(key.canonical_key(), raw),
        reason,
        "ignoring unusable connection value"
    );
}

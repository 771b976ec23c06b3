//! Secret detection and redaction utilities.
//!
//! Connection strings carry passwords and application keys. The codec itself
//! round-trips them untouched; these helpers keep them out of `Debug` output
//! and diagnostic events.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a connection-string key likely refers to a secret.
///
/// Matching is ASCII case-insensitive and ignores embedded spaces, so
/// `"App Key"` and `"APPKEY"` are treated alike.
///
/// # Examples
///
/// ```
/// use xrm_connection_shared::is_secret_key;
///
/// assert!(is_secret_key("Password"));
/// assert!(is_secret_key("AppKey"));
/// assert!(is_secret_key("client secret"));
/// assert!(!is_secret_key("Service Uri"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key: String = key
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    key.contains("PASSWORD")
        || key == "PWD"
        || key.contains("KEY")
        || key.contains("SECRET")
        || key.contains("TOKEN")
        || key.contains("CREDENTIAL")
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use xrm_connection_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("Password", "hunter2"), "[REDACTED]");
/// assert_eq!(redact_if_secret("Domain", "CONTOSO"), "CONTOSO");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the wrapped secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_connection_string_secrets() {
        assert!(is_secret_key("Password"));
        assert!(is_secret_key("password"));
        assert!(is_secret_key("PWD"));
        assert!(is_secret_key("AppKey"));
        assert!(is_secret_key("App Key"));
        assert!(is_secret_key("ClientSecret"));
        assert!(is_secret_key("Credentials"));
        // Token cache locations are kept out of logs as well.
        assert!(is_secret_key("TokenCacheStorePath"));
    }

    #[test]
    fn rejects_non_secret_keys() {
        assert!(!is_secret_key("Service Uri"));
        assert!(!is_secret_key("User Name"));
        assert!(!is_secret_key("Domain"));
        assert!(!is_secret_key("AuthType"));
        assert!(!is_secret_key("Timeout"));
    }

    #[test]
    fn redacts_secret_values() {
        assert_eq!(redact_if_secret("Password", "hunter2"), REDACTED);
        assert_eq!(redact_if_secret("Url", "https://x"), "https://x");
    }

    #[test]
    fn secret_string_redacts_display_and_debug() {
        let secret = SecretString::new("shh");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(secret.expose(), "shh");
        assert!(!secret.is_empty());
    }
}

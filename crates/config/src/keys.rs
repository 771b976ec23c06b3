//! Recognized connection-string keys and their accepted spellings.
//!
//! Each field reads from a fixed list of aliases (priority order) and is
//! always written back under one canonical key.

use xrm_connection_domain::ConnectionField;
use xrm_connection_grammar::ConnectionTokens;

/// A recognized connection-string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKey {
    /// Organization service URI.
    ServiceUri,
    /// Home realm URI.
    HomeRealmUri,
    /// OAuth redirect URI.
    RedirectUri,
    /// Windows domain.
    Domain,
    /// User name.
    Username,
    /// Password.
    Password,
    /// OAuth authority.
    Authority,
    /// OAuth client id.
    ClientId,
    /// Token cache location.
    TokenCacheStorePath,
    /// Application key.
    AppKey,
    /// Authentication type.
    AuthenticationType,
    /// Login prompt behavior.
    LoginPrompt,
    /// Request timeout.
    Timeout,
}

impl ConnectionKey {
    /// All keys, in serialization order.
    pub const ALL: [Self; 13] = [
        Self::ServiceUri,
        Self::HomeRealmUri,
        Self::RedirectUri,
        Self::Domain,
        Self::Username,
        Self::Password,
        Self::Authority,
        Self::ClientId,
        Self::TokenCacheStorePath,
        Self::AppKey,
        Self::AuthenticationType,
        Self::LoginPrompt,
        Self::Timeout,
    ];

    /// Accepted input spellings, highest priority first.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::ServiceUri => &["ServiceUri", "Service Uri", "Url", "Server"],
            // "Readlm" is the spelling existing configurations were written
            // with; it must keep matching.
            Self::HomeRealmUri => &["HomeReadlmUri", "Home Realm Uri"],
            Self::RedirectUri => &["RedirectUri", "ReplyUrl"],
            Self::Domain => &["Domain"],
            Self::Username => &["UserName", "User Name", "UserId", "User Id"],
            Self::Password => &["Password"],
            Self::Authority => &["Authority"],
            Self::ClientId => &["ClientId", "AppId", "ApplicationId"],
            Self::TokenCacheStorePath => &["TokenCacheStorePath"],
            Self::AppKey => &["AppKey"],
            Self::AuthenticationType => &["AuthType", "AuthenticationType", "Authentication Type"],
            Self::LoginPrompt => &["LoginPrompt"],
            Self::Timeout => &["Timeout"],
        }
    }

    /// Key written when serializing.
    #[must_use]
    pub const fn canonical_key(self) -> &'static str {
        match self {
            Self::ServiceUri => "Service Uri",
            Self::HomeRealmUri => "Home Realm Uri",
            Self::RedirectUri => "RedirectUri",
            Self::Domain => "Domain",
            Self::Username => "User Name",
            Self::Password => "Password",
            Self::Authority => "Authority",
            Self::ClientId => "ClientId",
            Self::TokenCacheStorePath => "TokenCacheStorePath",
            Self::AppKey => "AppKey",
            Self::AuthenticationType => "AuthType",
            Self::LoginPrompt => "LoginPrompt",
            Self::Timeout => "Timeout",
        }
    }

    /// Record field this key populates.
    #[must_use]
    pub const fn field(self) -> ConnectionField {
        match self {
            Self::ServiceUri => ConnectionField::ServiceUri,
            Self::HomeRealmUri => ConnectionField::HomeRealmUri,
            Self::RedirectUri => ConnectionField::RedirectUri,
            Self::Domain => ConnectionField::Domain,
            Self::Username => ConnectionField::Username,
            Self::Password => ConnectionField::Password,
            Self::Authority => ConnectionField::Authority,
            Self::ClientId => ConnectionField::ClientId,
            Self::TokenCacheStorePath => ConnectionField::TokenCacheStorePath,
            Self::AppKey => ConnectionField::AppKey,
            Self::AuthenticationType => ConnectionField::AuthenticationType,
            Self::LoginPrompt => ConnectionField::LoginPrompt,
            Self::Timeout => ConnectionField::Timeout,
        }
    }
}

/// Take the value for `key` out of `tokens`.
///
/// Every alias present is removed, so none of them reaches the unknown
/// options. The first alias with a non-empty value wins; an empty string
/// means no alias supplied one.
pub fn extract(tokens: &mut ConnectionTokens, key: ConnectionKey) -> String {
    let mut resolved: Option<String> = None;

    for alias in key.aliases() {
        let Some(value) = tokens.remove(alias) else {
            continue;
        };
        if resolved.is_none() && !value.is_empty() {
            tracing::trace!(field = key.field().name(), alias, "resolved connection key");
            resolved = Some(value);
        }
    }

    resolved.unwrap_or_default()
}

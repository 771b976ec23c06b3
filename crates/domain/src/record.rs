//! The connection record.

use crate::auth::{AuthenticationType, LoginPrompt};
use crate::observe::{ChangeObservers, ConnectionField, SubscriptionId};
use crate::uri;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use xrm_connection_shared::SecretString;

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How to reach and authenticate against an organization service.
///
/// Every mutation goes through a setter so that the service URI stays
/// normalized and subscribed observers hear about real changes. Empty strings
/// are stored as `None`.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    service_uri: Option<Url>,
    home_realm_uri: Option<Url>,
    redirect_uri: Option<Url>,
    domain: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    authority: Option<String>,
    client_id: Option<String>,
    token_cache_store_path: Option<String>,
    app_key: Option<SecretString>,
    authentication_type: Option<AuthenticationType>,
    login_prompt: LoginPrompt,
    timeout: Duration,
    unknown_options: String,
    observers: ChangeObservers,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            service_uri: None,
            home_realm_uri: None,
            redirect_uri: None,
            domain: None,
            username: None,
            password: None,
            authority: None,
            client_id: None,
            token_cache_store_path: None,
            app_key: None,
            authentication_type: None,
            login_prompt: LoginPrompt::default(),
            timeout: DEFAULT_TIMEOUT,
            unknown_options: String::new(),
            observers: ChangeObservers::default(),
        }
    }
}

impl PartialEq for ConnectionConfig {
    fn eq(&self, other: &Self) -> bool {
        self.service_uri == other.service_uri
            && self.home_realm_uri == other.home_realm_uri
            && self.redirect_uri == other.redirect_uri
            && self.domain == other.domain
            && self.username == other.username
            && self.password == other.password
            && self.authority == other.authority
            && self.client_id == other.client_id
            && self.token_cache_store_path == other.token_cache_store_path
            && self.app_key == other.app_key
            && self.authentication_type == other.authentication_type
            && self.login_prompt == other.login_prompt
            && self.timeout == other.timeout
            && self.unknown_options == other.unknown_options
    }
}

impl Eq for ConnectionConfig {}

impl ConnectionConfig {
    /// Create an empty record with defaults applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Organization service URI (always ends with the service path).
    pub const fn service_uri(&self) -> Option<&Url> {
        self.service_uri.as_ref()
    }

    /// Home realm URI.
    pub const fn home_realm_uri(&self) -> Option<&Url> {
        self.home_realm_uri.as_ref()
    }

    /// OAuth redirect URI.
    pub const fn redirect_uri(&self) -> Option<&Url> {
        self.redirect_uri.as_ref()
    }

    /// Windows domain.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// User name.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Password.
    pub const fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    /// OAuth authority.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// OAuth client id.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Token cache location.
    pub fn token_cache_store_path(&self) -> Option<&str> {
        self.token_cache_store_path.as_deref()
    }

    /// Application key.
    pub const fn app_key(&self) -> Option<&SecretString> {
        self.app_key.as_ref()
    }

    /// Authentication type; `None` means unspecified.
    pub const fn authentication_type(&self) -> Option<AuthenticationType> {
        self.authentication_type
    }

    /// Login prompt behavior.
    pub const fn login_prompt(&self) -> LoginPrompt {
        self.login_prompt
    }

    /// Request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Unrecognized options, kept verbatim.
    pub fn unknown_options(&self) -> &str {
        &self.unknown_options
    }

    // ---------------------------------------------------------------------
    // Derived
    // ---------------------------------------------------------------------

    /// Service root: the service URI without its organization path.
    pub fn base_uri(&self) -> Option<Url> {
        self.service_uri.as_ref().and_then(uri::base_uri)
    }

    /// Discovery endpoint derived from the service root.
    pub fn discovery_service_uri(&self) -> Option<Url> {
        self.service_uri
            .as_ref()
            .and_then(uri::discovery_service_uri)
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Set the service URI; the organization path is appended if missing.
    pub fn set_service_uri(&mut self, value: Option<Url>) -> bool {
        let value = uri::normalize_service_uri(value);
        self.assign(ConnectionField::ServiceUri, |c| &mut c.service_uri, value)
    }

    /// Set the home realm URI.
    pub fn set_home_realm_uri(&mut self, value: Option<Url>) -> bool {
        self.assign(ConnectionField::HomeRealmUri, |c| &mut c.home_realm_uri, value)
    }

    /// Set the OAuth redirect URI.
    pub fn set_redirect_uri(&mut self, value: Option<Url>) -> bool {
        self.assign(ConnectionField::RedirectUri, |c| &mut c.redirect_uri, value)
    }

    /// Set the Windows domain.
    pub fn set_domain(&mut self, value: Option<String>) -> bool {
        self.assign(ConnectionField::Domain, |c| &mut c.domain, non_empty(value))
    }

    /// Set the user name.
    pub fn set_username(&mut self, value: Option<String>) -> bool {
        self.assign(ConnectionField::Username, |c| &mut c.username, non_empty(value))
    }

    /// Set the password.
    pub fn set_password(&mut self, value: Option<SecretString>) -> bool {
        let value = value.filter(|secret| !secret.is_empty());
        self.assign(ConnectionField::Password, |c| &mut c.password, value)
    }

    /// Set the OAuth authority.
    pub fn set_authority(&mut self, value: Option<String>) -> bool {
        self.assign(ConnectionField::Authority, |c| &mut c.authority, non_empty(value))
    }

    /// Set the OAuth client id.
    pub fn set_client_id(&mut self, value: Option<String>) -> bool {
        self.assign(ConnectionField::ClientId, |c| &mut c.client_id, non_empty(value))
    }

    /// Set the token cache location.
    pub fn set_token_cache_store_path(&mut self, value: Option<String>) -> bool {
        self.assign(
            ConnectionField::TokenCacheStorePath,
            |c| &mut c.token_cache_store_path,
            non_empty(value),
        )
    }

    /// Set the application key.
    pub fn set_app_key(&mut self, value: Option<SecretString>) -> bool {
        let value = value.filter(|secret| !secret.is_empty());
        self.assign(ConnectionField::AppKey, |c| &mut c.app_key, value)
    }

    /// Set the authentication type.
    pub fn set_authentication_type(&mut self, value: Option<AuthenticationType>) -> bool {
        self.assign(
            ConnectionField::AuthenticationType,
            |c| &mut c.authentication_type,
            value,
        )
    }

    /// Set the login prompt behavior.
    pub fn set_login_prompt(&mut self, value: LoginPrompt) -> bool {
        self.assign(ConnectionField::LoginPrompt, |c| &mut c.login_prompt, value)
    }

    /// Set the request timeout.
    pub fn set_timeout(&mut self, value: Duration) -> bool {
        self.assign(ConnectionField::Timeout, |c| &mut c.timeout, value)
    }

    /// Replace the unrecognized-options residue.
    pub fn set_unknown_options(&mut self, value: impl Into<String>) -> bool {
        self.assign(
            ConnectionField::UnknownOptions,
            |c| &mut c.unknown_options,
            value.into(),
        )
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Subscribe to field changes. Observers run synchronously inside the
    /// setter, in registration order, only when the stored value changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(ConnectionField) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(observer))
    }

    /// Remove a subscription. Returns false when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Store `value` in the slot and notify observers if it differs from
    /// the current value. Returns whether a change happened.
    fn assign<T: PartialEq>(
        &mut self,
        field: ConnectionField,
        slot: fn(&mut Self) -> &mut T,
        value: T,
    ) -> bool {
        let current = slot(self);
        if *current == value {
            return false;
        }
        *current = value;
        self.observers.notify(field);
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::sync::Mutex;

    #[test]
    fn defaults_match_documented_values() {
        let config = ConnectionConfig::new();
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.login_prompt(), LoginPrompt::Auto);
        assert_eq!(config.authentication_type(), None);
        assert!(config.unknown_options().is_empty());
        assert!(config.base_uri().is_none());
        assert!(config.discovery_service_uri().is_none());
    }

    #[test]
    fn service_uri_is_normalized_on_assignment() -> Result<(), Box<dyn Error>> {
        let mut config = ConnectionConfig::new();
        config.set_service_uri(Some(Url::parse("https://org.crm.dynamics.com/")?));

        assert_eq!(
            config.service_uri().map(Url::as_str),
            Some("https://org.crm.dynamics.com/XRMServices/2011/Organization.svx")
        );
        assert_eq!(
            config.base_uri(),
            Some(Url::parse("https://org.crm.dynamics.com")?)
        );
        Ok(())
    }

    #[test]
    fn empty_strings_are_unset() {
        let mut config = ConnectionConfig::new();
        config.set_username(Some(String::new()));
        config.set_password(Some(SecretString::new("")));

        assert_eq!(config.username(), None);
        assert!(config.password().is_none());
    }

    #[test]
    fn observers_hear_only_real_changes() -> Result<(), Box<dyn Error>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut config = ConnectionConfig::new();
        config.subscribe(move |field| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(field);
            }
        });

        assert!(config.set_domain(Some("CONTOSO".to_owned())));
        assert!(!config.set_domain(Some("CONTOSO".to_owned())));
        assert!(!config.set_timeout(DEFAULT_TIMEOUT));
        assert!(config.set_timeout(Duration::from_secs(30)));
        config.set_service_uri(Some(Url::parse("https://org.crm.dynamics.com")?));
        // Same URI after normalization.
        assert!(!config.set_service_uri(Some(Url::parse(
            "https://org.crm.dynamics.com/XRMServices/2011/Organization.svx"
        )?)));

        let seen = seen.lock().map(|seen| seen.clone()).unwrap_or_default();
        assert_eq!(
            seen,
            vec![
                ConnectionField::Domain,
                ConnectionField::Timeout,
                ConnectionField::ServiceUri
            ]
        );
        Ok(())
    }

    #[test]
    fn unsubscribed_observers_stay_silent() {
        let seen = Arc::new(Mutex::new(0_usize));
        let sink = Arc::clone(&seen);
        let mut config = ConnectionConfig::new();
        let id = config.subscribe(move |_| {
            if let Ok(mut count) = sink.lock() {
                *count += 1;
            }
        });

        assert!(config.unsubscribe(id));
        config.set_login_prompt(LoginPrompt::Never);

        assert_eq!(seen.lock().map(|count| *count).unwrap_or(usize::MAX), 0);
    }

    #[test]
    fn equality_ignores_observers() {
        let mut left = ConnectionConfig::new();
        left.subscribe(|_| {});
        let right = ConnectionConfig::new();
        assert_eq!(left, right);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = ConnectionConfig::new();
        config.set_password(Some(SecretString::new("hunter2")));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}

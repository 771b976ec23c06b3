//! `ConnectionConfig` → connection string.

use crate::keys::ConnectionKey;
use url::Url;
use xrm_connection_domain::{
    AuthenticationType, ConnectionConfig, DEFAULT_TIMEOUT, format_timespan,
};
use xrm_connection_grammar::render_pair;
use xrm_connection_shared::SecretString;

/// Render a record as a connection string.
///
/// Fields are written under their canonical keys in [`ConnectionKey::ALL`]
/// order. Unset fields and default values are omitted; `LoginPrompt` is only
/// written for OAuth connections. The unknown options are appended last,
/// after a `;` even when they are empty. `None` renders as an empty string,
/// and so does a record with no fields written and no unknown options.
///
/// # Examples
///
/// ```
/// use xrm_connection_config::{parse_connection_string, to_connection_string};
///
/// let config = parse_connection_string("Url=https://org.crm.dynamics.com;Domain=CONTOSO")?;
/// assert_eq!(
///     to_connection_string(Some(&config)),
///     "Service Uri=https://org.crm.dynamics.com/XRMServices/2011/Organization.svx;Domain=CONTOSO;"
/// );
/// assert_eq!(to_connection_string(None), "");
/// # Ok::<(), xrm_connection_grammar::MalformedGrammarError>(())
/// ```
pub fn to_connection_string(config: Option<&ConnectionConfig>) -> String {
    let Some(config) = config else {
        return String::new();
    };

    let mut parts: Vec<String> = ConnectionKey::ALL
        .into_iter()
        .filter_map(|key| {
            field_text(config, key).map(|value| render_pair(key.canonical_key(), &value))
        })
        .collect();
    parts.push(config.unknown_options().to_owned());
    parts.join(";")
}

/// Text written for `key`, or `None` when the field is omitted.
fn field_text(config: &ConnectionConfig, key: ConnectionKey) -> Option<String> {
    match key {
        ConnectionKey::ServiceUri => config.service_uri().map(Url::to_string),
        ConnectionKey::HomeRealmUri => config.home_realm_uri().map(Url::to_string),
        ConnectionKey::RedirectUri => config.redirect_uri().map(Url::to_string),
        ConnectionKey::Domain => config.domain().map(str::to_owned),
        ConnectionKey::Username => config.username().map(str::to_owned),
        ConnectionKey::Password => config.password().map(exposed),
        ConnectionKey::Authority => config.authority().map(str::to_owned),
        ConnectionKey::ClientId => config.client_id().map(str::to_owned),
        ConnectionKey::TokenCacheStorePath => {
            config.token_cache_store_path().map(str::to_owned)
        },
        ConnectionKey::AppKey => config.app_key().map(exposed),
        ConnectionKey::AuthenticationType => config
            .authentication_type()
            .map(|auth| auth.as_str().to_owned()),
        ConnectionKey::LoginPrompt => {
            let oauth = config.authentication_type() == Some(AuthenticationType::OAuth);
            oauth.then(|| config.login_prompt().as_str().to_owned())
        },
        ConnectionKey::Timeout => (config.timeout() != DEFAULT_TIMEOUT)
            .then(|| format_timespan(config.timeout())),
    }
}

fn exposed(secret: &SecretString) -> String {
    secret.expose().to_owned()
}

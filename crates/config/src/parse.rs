//! Connection string → `ConnectionConfig`.

use crate::convert::{
    to_authentication_type, to_login_prompt, to_secret, to_text, to_timeout, to_uri,
};
use crate::keys::{ConnectionKey, extract};
use xrm_connection_domain::ConnectionConfig;
use xrm_connection_grammar::{MalformedGrammarError, parse_tokens};

/// Parse a connection string into a record.
///
/// Recognized keys are resolved through their aliases and removed; whatever
/// is left is re-rendered into [`ConnectionConfig::unknown_options`]. Only an
/// unterminated quoted value fails: every other problem degrades to an unset
/// or default field.
///
/// # Errors
///
/// Returns [`MalformedGrammarError`] when a quoted value is never closed.
///
/// # Examples
///
/// ```
/// use xrm_connection_config::parse_connection_string;
///
/// let config = parse_connection_string("Url=https://org.crm.dynamics.com;UserId=admin")?;
/// assert_eq!(config.username(), Some("admin"));
/// assert!(config.unknown_options().is_empty());
/// # Ok::<(), xrm_connection_grammar::MalformedGrammarError>(())
/// ```
pub fn parse_connection_string(text: &str) -> Result<ConnectionConfig, MalformedGrammarError> {
    let mut tokens = parse_tokens(text)?;
    let mut config = ConnectionConfig::new();

    let service_uri = extract(&mut tokens, ConnectionKey::ServiceUri);
    config.set_service_uri(to_uri(ConnectionKey::ServiceUri, &service_uri));
    let home_realm_uri = extract(&mut tokens, ConnectionKey::HomeRealmUri);
    config.set_home_realm_uri(to_uri(ConnectionKey::HomeRealmUri, &home_realm_uri));
    let redirect_uri = extract(&mut tokens, ConnectionKey::RedirectUri);
    config.set_redirect_uri(to_uri(ConnectionKey::RedirectUri, &redirect_uri));

    config.set_domain(to_text(extract(&mut tokens, ConnectionKey::Domain)));
    config.set_username(to_text(extract(&mut tokens, ConnectionKey::Username)));
    config.set_password(to_secret(extract(&mut tokens, ConnectionKey::Password)));
    config.set_authority(to_text(extract(&mut tokens, ConnectionKey::Authority)));
    config.set_client_id(to_text(extract(&mut tokens, ConnectionKey::ClientId)));
    config.set_token_cache_store_path(to_text(extract(
        &mut tokens,
        ConnectionKey::TokenCacheStorePath,
    )));
    config.set_app_key(to_secret(extract(&mut tokens, ConnectionKey::AppKey)));

    let authentication_type = extract(&mut tokens, ConnectionKey::AuthenticationType);
    config.set_authentication_type(to_authentication_type(&authentication_type));
    let login_prompt = extract(&mut tokens, ConnectionKey::LoginPrompt);
    config.set_login_prompt(to_login_prompt(&login_prompt));
    let timeout = extract(&mut tokens, ConnectionKey::Timeout);
    config.set_timeout(to_timeout(&timeout));

    config.set_unknown_options(tokens.render());
    Ok(config)
}

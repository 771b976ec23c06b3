//! Field-change subscriptions for connection records.

use std::fmt;
use std::sync::Arc;

/// Identity of a connection field, reported to observers on change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionField {
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
    /// Unrecognized key/value residue.
    UnknownOptions,
}

impl ConnectionField {
    /// Stable camelCase name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ServiceUri => "serviceUri",
            Self::HomeRealmUri => "homeRealmUri",
            Self::RedirectUri => "redirectUri",
            Self::Domain => "domain",
            Self::Username => "username",
            Self::Password => "password",
            Self::Authority => "authority",
            Self::ClientId => "clientId",
            Self::TokenCacheStorePath => "tokenCacheStorePath",
            Self::AppKey => "appKey",
            Self::AuthenticationType => "authenticationType",
            Self::LoginPrompt => "loginPrompt",
            Self::Timeout => "timeout",
            Self::UnknownOptions => "unknownOptions",
        }
    }
}

impl fmt::Display for ConnectionField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Callback invoked with the field that changed.
pub type FieldObserver = Arc<dyn Fn(ConnectionField) + Send + Sync>;

/// Handle returned by [`ChangeObservers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified synchronously in registration order.
///
/// Subscriptions belong to one record instance and are not carried over to
/// clones.
#[derive(Default)]
pub struct ChangeObservers {
    next_id: u64,
    observers: Vec<(SubscriptionId, FieldObserver)>,
}

impl ChangeObservers {
    /// Register an observer.
    pub fn subscribe(&mut self, observer: FieldObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns false when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(candidate, _)| *candidate != id);
        self.observers.len() != before
    }

    /// Notify every observer that `field` changed.
    pub fn notify(&self, field: ConnectionField) {
        for (_, observer) in &self.observers {
            observer(field);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true when nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Clone for ChangeObservers {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ChangeObservers {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ChangeObservers")
            .field("len", &self.observers.len())
            .finish()
    }
}

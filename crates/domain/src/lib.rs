//! # xrm-connection-domain
//!
//! The connection record and the value types it is built from:
//!
//! - **Record** - `ConnectionConfig` with normalized service URI and defaults
//! - **Auth** - `AuthenticationType`, `LoginPrompt`
//! - **URIs** - service-path normalization, base and discovery endpoints
//! - **Time spans** - the `[d.]hh:mm:ss[.fffffff]` timeout literal
//! - **Observers** - opt-in field-change subscriptions
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Knows nothing about connection-string text or key spellings
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use xrm_connection_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod auth;
pub mod observe;
pub mod record;
pub mod timespan;
pub mod uri;

pub use auth::{AuthenticationType, LoginPrompt};
pub use observe::{ChangeObservers, ConnectionField, FieldObserver, SubscriptionId};
pub use record::{ConnectionConfig, DEFAULT_TIMEOUT};
pub use timespan::{format_timespan, parse_timespan};
pub use uri::{
    DISCOVERY_SERVICE_PATH, ORGANIZATION_SERVICE_PATH, base_uri, base_uri_text,
    discovery_service_uri, normalize_service_uri, region_of,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

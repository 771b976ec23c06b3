//! # xrm-connection-ports
//!
//! Port traits at the edge of the connection codec.
//!
//! This crate defines the interfaces adapters implement to act on a parsed
//! connection. It depends only on `domain` and `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod discovery;

pub use discovery::*;

// Re-export the record so adapter crates can implement ports without
// depending on `xrm-connection-domain` directly.
pub use xrm_connection_domain::{AuthenticationType, ConnectionConfig};

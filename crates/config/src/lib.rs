//! # xrm-connection-config
//!
//! The XRM connection-string codec: alias resolution, lenient typed
//! conversion and canonical serialization of [`ConnectionConfig`].
//! This crate depends on `domain`, `grammar` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Lenient text → typed value conversion.
pub mod convert;
/// Method-style codec entry points.
pub mod ext;
/// Recognized keys and alias resolution.
pub mod keys;
/// Connection string parsing.
pub mod parse;
/// Connection string serialization.
pub mod serialize;

pub use ext::ConnectionStringExt;
pub use keys::{ConnectionKey, extract};
pub use parse::parse_connection_string;
pub use serialize::to_connection_string;
pub use xrm_connection_domain::ConnectionConfig;

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

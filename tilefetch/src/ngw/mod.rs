//! Client for the resource schema of a NextGIS-style map server.
//!
//! A [`Connection`] logs in with a form POST, keeps the returned session
//! cookie, and asks `<url>/resource/schema` which [`ResourceKind`]s the
//! server supports.

mod connection;
mod kind;

pub use connection::{parse_supported_kinds, Connection, SchemaError};
pub use kind::ResourceKind;

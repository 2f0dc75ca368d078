//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`cache`] - Cache management (stats, clear, path)
//! - [`capabilities`] - Resource kinds supported by a map server
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`fetch`] - Resolve a single tile
//! - [`prefetch`] - Warm the cache for an area
//! - [`template`] - Inspect a URL template

pub mod cache;
pub mod capabilities;
pub mod common;
pub mod config;
pub mod fetch;
pub mod prefetch;
pub mod template;

//! Provider error types

use std::fmt;

/// Errors from a single tile download.
///
/// Every variant makes the fetcher fall back to the disk cache.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The HTTP client could not be constructed
    ClientBuild(String),
    /// Connection, timeout or body read failure
    HttpError(String),
    /// Server answered with anything other than 200
    HttpStatus { status: u16, url: String },
    /// Server answered 200 without a body
    EmptyBody { url: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::ClientBuild(msg) => write!(f, "Failed to create HTTP client: {}", msg),
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            ProviderError::EmptyBody { url } => write!(f, "Empty response body from {}", url),
        }
    }
}

impl std::error::Error for ProviderError {}

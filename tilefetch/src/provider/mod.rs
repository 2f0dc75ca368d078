//! Remote tile download.
//!
//! The fetcher talks to the network only through [`HttpClient`], so tests
//! can substitute a mock and the production path uses [`ReqwestClient`].

mod http;
mod types;

pub(crate) use http::build_blocking_client;
pub use http::{
    HttpClient, HttpClientConfig, ReqwestClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT,
    USER_AGENT,
};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;

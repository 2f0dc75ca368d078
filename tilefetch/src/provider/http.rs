//! HTTP client abstraction for testability

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::StatusCode;

use super::types::ProviderError;

/// Default time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time allowed for the whole response to arrive.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("tilefetch/", env!("CARGO_PKG_VERSION"));

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the full body.
    ///
    /// Only a `200 OK` with a non-empty body is a success.
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Connection settings for [`ReqwestClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Builds a blocking reqwest client that never follows redirects.
pub(crate) fn build_blocking_client(
    config: &HttpClientConfig,
) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_timeout)
        .user_agent(config.user_agent.as_str())
        .redirect(Policy::none())
        .build()
        .map_err(|e| ProviderError::ClientBuild(e.to_string()))
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(&HttpClientConfig::default())
    }

    /// Creates a new ReqwestClient with custom timeouts.
    pub fn with_config(config: &HttpClientConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_blocking_client(config)?,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProviderError::HttpError(format!("Request failed: {}", e)))?;

        // Redirects and other 2xx codes are failures too
        if response.status() != StatusCode::OK {
            return Err(ProviderError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))?;

        if body.is_empty() {
            return Err(ProviderError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(body.to_vec())
    }
}

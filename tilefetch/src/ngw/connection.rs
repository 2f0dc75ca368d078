//! Login session and capability discovery.

use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::provider::{build_blocking_client, HttpClientConfig, ProviderError};

use super::ResourceKind;

/// Errors talking to the resource schema endpoint.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Client(#[from] ProviderError),

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("login to {url} returned no session cookie")]
    NoSessionCookie { url: String },

    #[error("not connected")]
    NotConnected,

    #[error("invalid resource schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("resource schema has no \"resources\" object")]
    MissingResources,
}

/// Parses a schema document into the recognized kinds, each listed once.
pub fn parse_supported_kinds(json: &str) -> Result<Vec<ResourceKind>, SchemaError> {
    let schema: serde_json::Value = serde_json::from_str(json)?;
    let resources = schema
        .get("resources")
        .and_then(|r| r.as_object())
        .ok_or(SchemaError::MissingResources)?;

    let mut kinds = Vec::new();
    for name in resources.keys() {
        let kind = ResourceKind::from_schema_name(name);
        if kind != ResourceKind::None && !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// A session with one map server.
#[derive(Debug)]
pub struct Connection {
    name: String,
    login: String,
    password: String,
    url: String,
    cookie: Option<String>,
    supported: Vec<ResourceKind>,
    client: reqwest::blocking::Client,
}

impl Connection {
    /// Creates an unconnected session; `http://` is prepended when `url`
    /// has no scheme.
    pub fn new(
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        url: &str,
        config: &HttpClientConfig,
    ) -> Result<Self, SchemaError> {
        let url = if url.starts_with("http") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };

        Ok(Self {
            name: name.into(),
            login: login.into(),
            password: password.into(),
            url,
            cookie: None,
            supported: Vec::new(),
            client: build_blocking_client(config)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.cookie.is_some()
    }

    /// Kinds found by the last capability query.
    pub fn supported_kinds(&self) -> &[ResourceKind] {
        &self.supported
    }

    /// Logs in and loads capabilities.
    ///
    /// The session counts as established when the server sets a cookie,
    /// whatever the status code.
    pub fn connect(&mut self) -> Result<(), SchemaError> {
        let url = format!("{}/login", self.url);
        let response = self
            .client
            .post(&url)
            .form(&[("login", &self.login), ("password", &self.password)])
            .send()
            .map_err(|source| SchemaError::Request {
                url: url.clone(),
                source,
            })?;

        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| SchemaError::NoSessionCookie { url: url.clone() })?;

        info!(connection = %self.name, url = %self.url, "Connected");
        self.cookie = Some(cookie);
        self.fill_capabilities();
        Ok(())
    }

    /// Refreshes the supported kinds; failures leave the list empty.
    pub fn fill_capabilities(&mut self) {
        self.supported.clear();
        match self.fetch_capabilities() {
            Ok(kinds) => {
                debug!(connection = %self.name, kinds = kinds.len(), "Resource schema loaded");
                self.supported = kinds;
            }
            Err(e) => {
                warn!(connection = %self.name, error = %e, "Failed to load resource schema");
            }
        }
    }

    /// Queries `<url>/resource/schema` with the session cookie.
    pub fn fetch_capabilities(&self) -> Result<Vec<ResourceKind>, SchemaError> {
        let cookie = self.cookie.as_deref().ok_or(SchemaError::NotConnected)?;
        let url = format!("{}/resource/schema", self.url);

        let body = self
            .client
            .get(&url)
            .header(COOKIE, cookie)
            .header(ACCEPT, "*/*")
            .send()
            .and_then(|response| response.text())
            .map_err(|source| SchemaError::Request {
                url: url.clone(),
                source,
            })?;

        parse_supported_kinds(&body)
    }

    /// True when no capabilities are known or `kind` is among them.
    pub fn is_type_supported(&self, kind: ResourceKind) -> bool {
        self.supported.is_empty() || self.supported.contains(&kind)
    }
}

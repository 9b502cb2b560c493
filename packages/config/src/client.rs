//! Shared HTTP client settings.
//!
//! One [`reqwest::Client`] is built per run from a [`ClientConfig`] and
//! passed explicitly to whatever makes requests.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::ConfigError;

/// Settings for the shared HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Overall per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Cap on pooled connections per host.
    pub max_connections: usize,
    /// Whether to offer HTTP/2 during TLS negotiation. When `false` the
    /// client speaks HTTP/1.1 only.
    #[serde(default = "default_true")]
    pub http2: bool,
    /// Headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

const fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Returns a copy of these settings with no default headers.
    ///
    /// Used for the scraping proxy, which is an API rather than the site
    /// itself and should not receive browser headers.
    #[must_use]
    pub fn without_headers(&self) -> Self {
        Self {
            headers: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Converts the configured headers into a [`reqwest::header::HeaderMap`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a name or value is not a
    /// legal HTTP header.
    pub fn header_map(&self) -> Result<reqwest::header::HeaderMap, ConfigError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in &self.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ConfigError::InvalidHeader {
                    name: key.clone(),
                    message: e.to_string(),
                }
            })?;
            let val = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                ConfigError::InvalidHeader {
                    name: key.clone(),
                    message: e.to_string(),
                }
            })?;
            header_map.insert(name, val);
        }
        Ok(header_map)
    }

    /// Builds a [`reqwest::Client`] from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a header is invalid or the client cannot
    /// be constructed.
    pub fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder()
            .default_headers(self.header_map()?)
            .timeout(Duration::from_secs(self.timeout_secs))
            .pool_max_idle_per_host(self.max_connections);

        if !self.http2 {
            builder = builder.http1_only();
        }

        Ok(builder.build()?)
    }
}

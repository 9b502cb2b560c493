#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Configuration for the attractions scraper.
//!
//! Defaults live in TOML files under `services/` and are embedded at compile
//! time:
//!
//! * `client.toml`: browser-like headers, timeout and connection cap for
//!   the shared [`reqwest::Client`].
//! * `search.toml`: the typeahead search endpoint and its fixed payload
//!   values.
//! * `proxy.toml`: the scraping proxy endpoint and geo-location hint.
//! * `site.toml`: site origin, offset-marker rewrite, output path and the
//!   CSS selectors used for extraction.
//!
//! An overrides file can replace any of these sections wholesale at runtime
//! (see [`AppConfig::load`]).

pub mod client;
pub mod services;

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use client::ClientConfig;
pub use services::{ProxyConfig, SearchConfig, SelectorConfig, SiteConfig};

/// Errors from loading configuration or building clients from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading an overrides file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An overrides file is not valid TOML for the expected shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A configured header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// Header name as written in the configuration.
        name: String,
        /// Why the header was rejected.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared HTTP client settings.
    pub client: ClientConfig,
    /// Typeahead location search.
    pub search: SearchConfig,
    /// Scraping proxy.
    pub proxy: ProxyConfig,
    /// Target site layout and output.
    pub site: SiteConfig,
}

/// Sections an overrides file may replace. Absent sections keep the
/// embedded defaults.
#[derive(Debug, Default, Deserialize)]
struct Overrides {
    client: Option<ClientConfig>,
    search: Option<SearchConfig>,
    proxy: Option<ProxyConfig>,
    site: Option<SiteConfig>,
}

// ── Compile-time embedded TOML files ────────────────────────────────

const CLIENT_TOML: &str = include_str!("../services/client.toml");
const SEARCH_TOML: &str = include_str!("../services/search.toml");
const PROXY_TOML: &str = include_str!("../services/proxy.toml");
const SITE_TOML: &str = include_str!("../services/site.toml");

fn parse_embedded<T: DeserializeOwned>(name: &str, toml_str: &str) -> T {
    toml::de::from_str(toml_str)
        .unwrap_or_else(|e| panic!("Failed to parse embedded config '{name}': {e}"))
}

impl AppConfig {
    /// Returns the embedded default configuration.
    ///
    /// # Panics
    ///
    /// Panics if any embedded TOML file is malformed (this is a compile-time
    /// guarantee since the files ship with the binary).
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            client: parse_embedded("client", CLIENT_TOML),
            search: parse_embedded("search", SEARCH_TOML),
            proxy: parse_embedded("proxy", PROXY_TOML),
            site: parse_embedded("site", SITE_TOML),
        }
    }

    /// Applies an overrides document on top of `self`.
    ///
    /// Each of `[client]`, `[search]`, `[proxy]` and `[site]` that is present
    /// replaces the whole section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document does not parse.
    pub fn with_overrides_str(mut self, toml_str: &str) -> Result<Self, ConfigError> {
        let overrides: Overrides = toml::de::from_str(toml_str)?;

        if let Some(client) = overrides.client {
            log::debug!("Overriding [client] section");
            self.client = client;
        }
        if let Some(search) = overrides.search {
            log::debug!("Overriding [search] section");
            self.search = search;
        }
        if let Some(proxy) = overrides.proxy {
            log::debug!("Overriding [proxy] section");
            self.proxy = proxy;
        }
        if let Some(site) = overrides.site {
            log::debug!("Overriding [site] section");
            self.site = site;
        }

        Ok(self)
    }

    /// Loads the embedded defaults, then applies the overrides file at
    /// `path` if one is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the overrides file cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::embedded();
        let Some(path) = path else {
            return Ok(config);
        };

        log::info!("Loading config overrides from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        config.with_overrides_str(&contents)
    }
}

//! Settings for the external services and the target site.

use std::path::PathBuf;

use attractions_models::LocationType;
use serde::Deserialize;

/// Typeahead location search settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// GraphQL endpoint that accepts pre-registered query ids.
    pub endpoint: String,
    /// Value for the `Origin` header.
    pub origin: String,
    /// Value for the `Referer` header.
    pub referer: String,
    /// Pre-registered query id, sent as both `query` and
    /// `extensions.preRegisteredQueryId`.
    pub query_id: String,
    /// Maximum number of results requested.
    pub limit: u32,
    /// Search scope (e.g. `"WORLDWIDE"`).
    pub scope: String,
    /// Result locale (e.g. `"en-US"`).
    pub locale: String,
    /// Geo id the scope is centred on.
    pub scope_geo_id: u64,
    /// Result kinds requested (e.g. `["LOCATION"]`).
    pub result_types: Vec<String>,
    /// Location kinds the search may return.
    pub location_types: Vec<LocationType>,
    /// Optional features switched on in the request.
    #[serde(default)]
    pub enabled_features: Vec<String>,
    /// Whether recently viewed locations may be included.
    #[serde(default)]
    pub include_recent: bool,
    /// Header carrying the random per-request token.
    pub request_id_header: String,
    /// Length of the random per-request token.
    pub request_id_length: usize,
}

/// Scraping proxy settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Realtime query endpoint.
    pub endpoint: String,
    /// Proxy source type (e.g. `"universal"`).
    pub source: String,
    /// Geo-location hint the proxy fetches the page from.
    pub geo_location: String,
}

/// Target site layout, offset rewrite and output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host prefixed to site-relative paths.
    pub origin: String,
    /// Listing page scraped when no query or URL is given.
    pub default_listing_path: String,
    /// Path segment after which the offset marker is inserted.
    pub offset_anchor: String,
    /// Offset marker inserted after [`Self::offset_anchor`].
    pub offset_marker: String,
    /// Where the output table is written.
    pub output_path: PathBuf,
    /// CSS selectors for extraction.
    pub selectors: SelectorConfig,
}

impl SiteConfig {
    /// Returns the absolute URL of the default listing page.
    #[must_use]
    pub fn default_listing_url(&self) -> String {
        format!("{}{}", self.origin, self.default_listing_path)
    }
}

/// CSS selectors identifying listing cards and image cards.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// One attraction entry.
    pub listing_card: String,
    /// Name element nested inside a listing card.
    pub name: String,
    /// Rating element nested inside a listing card.
    pub rating: String,
    /// One image slot.
    pub image_card: String,
    /// Image element nested inside an image card.
    pub image: String,
    /// Attribute of the image element holding the URL.
    pub image_attr: String,
}

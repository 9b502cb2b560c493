#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing fetch-and-extract.
//!
//! One listing page is fetched through the scraping proxy ([`proxy`]), then
//! two independent passes over the parsed document ([`extract`]) collect
//! name/rating pairs from listing cards and image URLs from image cards.
//! The passes are joined by position ([`merge`]) and the rows are written to
//! a CSV table ([`output`]).
//!
//! One page, one request. There is no pagination, retry or backoff.

pub mod extract;
pub mod merge;
pub mod output;
pub mod proxy;

use attractions_config::ProxyConfig;
use attractions_models::ListingRecord;

pub use extract::ListingSelectors;
pub use proxy::ProxyCredentials;

/// Errors that can occur while fetching, extracting or writing listings.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy response is not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the CSV table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configured CSS selector does not parse.
    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    /// The proxy response has no `results[0].content`.
    #[error("Proxy response (status {status}) missing results[0].content")]
    MissingContent {
        /// HTTP status of the proxy response.
        status: u16,
    },

    /// The listing pass and the image pass found different numbers of
    /// elements, so rows cannot be paired by position.
    #[error("Found {records} listing cards but {images} image cards")]
    CountMismatch {
        /// Number of listing cards.
        records: usize,
        /// Number of image URLs.
        images: usize,
    },
}

/// Fetches `target_url` through the scraping proxy and extracts its
/// listing rows.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the fetch fails, the proxy response carries no
/// page content, or the listing and image counts differ.
pub async fn fetch_and_extract(
    client: &reqwest::Client,
    config: &ProxyConfig,
    selectors: &ListingSelectors,
    target_url: &str,
    credentials: &ProxyCredentials,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let html = proxy::fetch_html(client, config, target_url, credentials).await?;
    extract::extract_records(&html, selectors)
}

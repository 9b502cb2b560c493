//! Selector-based extraction of listing rows.
//!
//! Two independent passes run over the same document:
//!
//! * [`extract_listings`] visits every listing card and reads its name and
//!   rating. A card always yields one entry, even when its name or rating
//!   element is missing.
//! * [`extract_image_urls`] visits every image card and reads the URL of
//!   its first image.
//!
//! The passes share nothing; [`crate::merge::merge_positional`] pairs them
//! up afterwards.

use attractions_config::SelectorConfig;
use attractions_models::{ListingRecord, NO_RATING_FOUND};
use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

/// Compiled CSS selectors for a listing page.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    listing_card: Selector,
    name: Selector,
    rating: Selector,
    image_card: Selector,
    image: Selector,
    image_attr: String,
}

impl ListingSelectors {
    /// Compiles the configured selectors.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if any selector does not parse.
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            listing_card: parse_selector(&config.listing_card)?,
            name: parse_selector(&config.name)?,
            rating: parse_selector(&config.rating)?,
            image_card: parse_selector(&config.image_card)?,
            image: parse_selector(&config.image)?,
            image_attr: config.image_attr.clone(),
        })
    }
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("'{selector}': {e}")))
}

/// Name and rating read from one listing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRating {
    /// Trimmed name text, `None` if the card has no name element.
    pub name: Option<String>,
    /// Trimmed rating text, or [`NO_RATING_FOUND`].
    pub rating: String,
}

/// Concatenates the element's text nodes, each trimmed, skipping empty ones.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reads the name and rating of every listing card, in document order.
#[must_use]
pub fn extract_listings(document: &Html, selectors: &ListingSelectors) -> Vec<NameRating> {
    document
        .select(&selectors.listing_card)
        .map(|card| {
            let name = card.select(&selectors.name).next().map(stripped_text);
            match &name {
                Some(name) => log::debug!("{name}"),
                None => log::debug!("No name found"),
            }

            let rating = card
                .select(&selectors.rating)
                .next()
                .map_or_else(|| NO_RATING_FOUND.to_owned(), stripped_text);
            log::debug!("{rating}");

            NameRating { name, rating }
        })
        .collect()
}

/// Reads the image URL of every image card, in document order.
///
/// Cards without an image element are skipped. An image without the URL
/// attribute yields an empty string.
#[must_use]
pub fn extract_image_urls(document: &Html, selectors: &ListingSelectors) -> Vec<String> {
    document
        .select(&selectors.image_card)
        .filter_map(|card| card.select(&selectors.image).next())
        .map(|img| {
            let src = img.value().attr(&selectors.image_attr).unwrap_or_default();
            log::debug!("Image URL from {} attribute: {src}", selectors.image_attr);
            src.to_owned()
        })
        .collect()
}

/// Parses `html` and runs both passes, pairing results by position.
///
/// # Errors
///
/// Returns [`ScrapeError::CountMismatch`] if the passes find different
/// numbers of elements.
pub fn extract_records(
    html: &str,
    selectors: &ListingSelectors,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let document = Html::parse_document(html);

    let listings = extract_listings(&document, selectors);
    let image_urls = extract_image_urls(&document, selectors);

    log::info!(
        "Extracted {} listing cards and {} image cards",
        listings.len(),
        image_urls.len()
    );

    crate::merge::merge_positional(listings, image_urls)
}

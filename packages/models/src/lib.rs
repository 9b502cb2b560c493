#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared record types for the attractions scraper.
//!
//! [`LocationCandidate`] is what the typeahead search returns for a free-text
//! place name. [`ListingRecord`] is one row of the output table, built from a
//! listing card and the image card at the same position on the page.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Rating value written when a listing card carries no `<title>` element.
pub const NO_RATING_FOUND: &str = "No rating found";

/// Column order of the output table.
pub const OUTPUT_COLUMNS: [&str; 3] = ["name", "rating", "image"];

/// Kinds of location the typeahead search can be asked to return.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// Cities, regions and countries
    Geo,
    Airport,
    /// Hotels and other lodging
    Accommodation,
    Attraction,
    /// Bookable tours and tickets attached to an attraction
    AttractionProduct,
    /// Restaurants
    Eatery,
    Neighborhood,
    Airline,
    Shopping,
    University,
    GeneralHospital,
    Port,
    Ferry,
    Corporation,
    VacationRental,
    Ship,
    CruiseLine,
    CarRentalOffice,
}

impl LocationType {
    /// Every location type, in the order the search request lists them.
    pub const ALL: &[Self] = &[
        Self::Geo,
        Self::Airport,
        Self::Accommodation,
        Self::Attraction,
        Self::AttractionProduct,
        Self::Eatery,
        Self::Neighborhood,
        Self::Airline,
        Self::Shopping,
        Self::University,
        Self::GeneralHospital,
        Self::Port,
        Self::Ferry,
        Self::Corporation,
        Self::VacationRental,
        Self::Ship,
        Self::CruiseLine,
        Self::CarRentalOffice,
    ];
}

/// A location returned by the typeahead search.
///
/// Field names on the wire are the ones the search service uses; the Rust
/// names describe what each field holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// Localised display name (e.g. "Hue, Thua Thien-Hue Province").
    #[serde(rename = "localizedName")]
    pub display_name: String,
    /// Site-relative path of the location's own page.
    #[serde(rename = "url")]
    pub canonical_path: String,
    /// Site-relative path of the location's attractions listing.
    #[serde(rename = "ATTRACTIONS_URL")]
    pub attractions_path: String,
    /// Site-relative path of the location's hotels listing.
    #[serde(rename = "HOTELS_URL")]
    pub hotels_path: String,
    /// Site-relative path of the location's restaurants listing.
    #[serde(rename = "RESTAURANTS_URL")]
    pub restaurants_path: String,
    /// Service-defined place kind (e.g. `"CITY"`, `"ATTRACTION"`).
    #[serde(rename = "placeType")]
    pub place_type: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// One row of the output table.
///
/// Serialises with the column names `name`, `rating`, `image`, in that
/// order. A missing name is written as an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Attraction name, `None` when the card has no name element.
    pub name: Option<String>,
    /// Rating text, or [`NO_RATING_FOUND`].
    pub rating: String,
    /// Image URL taken from the image card at the same position.
    #[serde(rename = "image")]
    pub image_url: String,
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location resolver.
//!
//! Turns a free-text place name (e.g. "Hue") into the site's attractions
//! listing URL for that place:
//!
//! 1. [`resolve`] posts one pre-registered GraphQL typeahead query
//!    ([`request`]) carrying a fresh random token ([`request_id`]) and
//!    decodes the candidate locations ([`response`]).
//! 2. [`target_url`] rewrites the first candidate's attractions path with
//!    the page-offset marker and prefixes the site origin.
//!
//! There is exactly one request per call and no retry.

pub mod request;
pub mod request_id;
pub mod response;
pub mod target_url;

use attractions_config::{SearchConfig, SiteConfig};
use attractions_models::LocationCandidate;
use thiserror::Error;

/// Errors from resolving a location.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A key the response must contain is absent.
    #[error("Search response missing field '{path}'")]
    MissingField {
        /// JSON path of the absent key (e.g. `"[0].data"`).
        path: String,
    },

    /// The query is empty or whitespace.
    #[error("Search query is empty")]
    EmptyQuery,

    /// The search returned no usable candidates.
    #[error("No locations found for '{query}'")]
    NoCandidates {
        /// The query that was searched.
        query: String,
    },
}

/// Searches for locations matching `query`.
///
/// Candidates are returned in the order the service sent them. Results
/// without a `details` payload are dropped.
///
/// # Errors
///
/// Returns [`ResolveError`] if the query is empty, the request fails, or the
/// response is missing any expected field. No partial results are returned.
///
/// A non-blank query is sent exactly as given, surrounding whitespace
/// included.
pub async fn resolve(
    client: &reqwest::Client,
    config: &SearchConfig,
    query: &str,
) -> Result<Vec<LocationCandidate>, ResolveError> {
    if query.trim().is_empty() {
        return Err(ResolveError::EmptyQuery);
    }

    log::info!("Scraping location data: {query}");

    let payload = request::build_payload(config, query);
    let token = request_id::random_request_id(config.request_id_length);

    let resp = client
        .post(&config.endpoint)
        .header(config.request_id_header.as_str(), token)
        .header(reqwest::header::REFERER, config.referer.as_str())
        .header(reqwest::header::ORIGIN, config.origin.as_str())
        .json(&payload)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        log::warn!("Search service returned status {status}");
    }

    let body = resp.text().await?;
    let candidates = response::parse_candidates(&body)?;

    log::info!("Found {} results", candidates.len());
    Ok(candidates)
}

/// Resolves `query` and returns the attractions listing URL of the first
/// candidate, with the page-offset marker inserted.
///
/// # Errors
///
/// Returns [`ResolveError`] if [`resolve`] fails or finds no candidates.
pub async fn resolve_target_url(
    client: &reqwest::Client,
    search: &SearchConfig,
    site: &SiteConfig,
    query: &str,
) -> Result<String, ResolveError> {
    let candidates = resolve(client, search, query).await?;
    let first = first_candidate(&candidates, query)?;

    log::info!("Using '{}' ({})", first.display_name, first.place_type);
    Ok(target_url::target_url_for(first, site))
}

/// Returns the candidate the rest of the run uses.
///
/// # Errors
///
/// Returns [`ResolveError::NoCandidates`] if `candidates` is empty.
pub fn first_candidate<'a>(
    candidates: &'a [LocationCandidate],
    query: &str,
) -> Result<&'a LocationCandidate, ResolveError> {
    candidates.first().ok_or_else(|| ResolveError::NoCandidates {
        query: query.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hue_body() -> serde_json::Value {
        serde_json::json!([{
            "data": {
                "Typeahead_autocomplete": {
                    "results": [{
                        "details": {
                            "localizedName": "Hue",
                            "url": "/Tourism-g1-Hue.html",
                            "ATTRACTIONS_URL": "/Attractions-g1-Activities-Hue.html",
                            "HOTELS_URL": "/Hotels-g1-Hue.html",
                            "RESTAURANTS_URL": "/Restaurants-g1-Hue.html",
                            "placeType": "CITY",
                            "latitude": 16.46,
                            "longitude": 107.59
                        }
                    }]
                }
            }
        }])
    }

    fn search_config(server: &MockServer) -> SearchConfig {
        let mut config = attractions_config::AppConfig::embedded().search;
        config.endpoint = format!("{}/data/graphql/ids", server.uri());
        config
    }

    #[tokio::test]
    async fn each_call_sends_a_fresh_request_id_and_site_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/data/graphql/ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hue_body()))
            .mount(&server)
            .await;

        let config = search_config(&server);
        let client = reqwest::Client::new();
        resolve(&client, &config, "Hue").await.unwrap();
        resolve(&client, &config, "Hue").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);

        let ids: Vec<String> = requests
            .iter()
            .map(|request| {
                let headers = &request.headers;
                assert_eq!(headers.get("referer").unwrap(), config.referer.as_str());
                assert_eq!(headers.get("origin").unwrap(), config.origin.as_str());
                headers
                    .get("x-requested-by")
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_owned()
            })
            .collect();

        for id in &ids {
            assert_eq!(id.len(), 180);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
        assert_ne!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn query_is_sent_without_trimming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/data/graphql/ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hue_body()))
            .mount(&server)
            .await;

        let config = search_config(&server);
        resolve(&reqwest::Client::new(), &config, "  Hue ")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(sent[0]["variables"]["request"]["query"], "  Hue ");
        assert_eq!(sent[0]["query"], "84b17ed122fbdbd4");
    }

    #[tokio::test]
    async fn blank_query_sends_nothing() {
        let server = MockServer::start().await;
        let config = search_config(&server);

        let err = resolve(&reqwest::Client::new(), &config, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::EmptyQuery));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_with_valid_body_still_yields_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/data/graphql/ids"))
            .respond_with(ResponseTemplate::new(500).set_body_json(hue_body()))
            .mount(&server)
            .await;

        let candidates = resolve(&reqwest::Client::new(), &search_config(&server), "Hue")
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].display_name, "Hue");
    }

    #[tokio::test]
    async fn target_url_carries_offset_marker() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/data/graphql/ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hue_body()))
            .mount(&server)
            .await;

        let site = attractions_config::AppConfig::embedded().site;
        let url = resolve_target_url(
            &reqwest::Client::new(),
            &search_config(&server),
            &site,
            "Hue",
        )
        .await
        .unwrap();

        assert_eq!(
            url,
            "https://www.tripadvisor.com/Attractions-g1-Activities-oa0-Hue.html"
        );
    }

    #[test]
    fn first_candidate_of_empty_list_is_an_error() {
        let err = first_candidate(&[], "Atlantis").unwrap_err();
        assert!(matches!(err, ResolveError::NoCandidates { ref query } if query == "Atlantis"));
    }

    #[test]
    fn canned_search_without_anchor_leaves_path_unchanged() {
        let body = serde_json::json!([{
            "data": {
                "Typeahead_autocomplete": {
                    "results": [{
                        "details": {
                            "localizedName": "Hue",
                            "url": "/Tourism-g1-Hue.html",
                            "ATTRACTIONS_URL": "/Attraction_Review-g1-d1-Reviews-Hue.html",
                            "HOTELS_URL": "/Hotels-g1-Hue.html",
                            "RESTAURANTS_URL": "/Restaurants-g1-Hue.html",
                            "placeType": "CITY",
                            "latitude": 16.46,
                            "longitude": 107.59
                        }
                    }]
                }
            }
        }])
        .to_string();

        let candidates = response::parse_candidates(&body).unwrap();
        let first = first_candidate(&candidates, "Hue").unwrap();

        let site = attractions_config::AppConfig::embedded().site;
        let rewritten = target_url::insert_offset_marker(
            &first.attractions_path,
            &site.offset_anchor,
            &site.offset_marker,
        );
        assert_eq!(rewritten, "/Attraction_Review-g1-d1-Reviews-Hue.html");
        assert_eq!(
            target_url::target_url_for(first, &site),
            "https://www.tripadvisor.com/Attraction_Review-g1-d1-Reviews-Hue.html"
        );
    }
}

//! Scraping proxy client.
//!
//! The proxy fetches the target page server-side and returns it wrapped in
//! JSON as `results[0].content`. Requests authenticate with HTTP basic auth.

use attractions_config::ProxyConfig;
use serde::{Deserialize, Serialize};

use crate::ScrapeError;

/// Environment variable holding the proxy username.
pub const USERNAME_ENV: &str = "ATTRACTIONS_PROXY_USERNAME";
/// Environment variable holding the proxy password.
pub const PASSWORD_ENV: &str = "ATTRACTIONS_PROXY_PASSWORD";

/// Basic-auth credentials for the scraping proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reads proxy credentials from [`USERNAME_ENV`] and [`PASSWORD_ENV`].
///
/// Returns `Some` only when **both** are set and non-empty.
#[must_use]
pub fn credentials_from_env() -> Option<ProxyCredentials> {
    let username = std::env::var(USERNAME_ENV).ok()?;
    let password = std::env::var(PASSWORD_ENV).ok()?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some(ProxyCredentials { username, password })
}

/// Request body for a realtime proxy query.
#[derive(Debug, Serialize)]
struct ProxyQuery<'a> {
    source: &'a str,
    url: &'a str,
    geo_location: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    results: Option<Vec<ProxyResult>>,
}

#[derive(Debug, Deserialize)]
struct ProxyResult {
    content: Option<String>,
}

/// Fetches the rendered HTML of `target_url` through the proxy.
///
/// A non-success status is logged; the call only fails if the body does not
/// carry page content.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the request fails or the response has no
/// `results[0].content`.
pub async fn fetch_html(
    client: &reqwest::Client,
    config: &ProxyConfig,
    target_url: &str,
    credentials: &ProxyCredentials,
) -> Result<String, ScrapeError> {
    log::info!("Fetching {target_url} via proxy ({})", config.geo_location);

    let query = ProxyQuery {
        source: &config.source,
        url: target_url,
        geo_location: &config.geo_location,
    };

    let resp = client
        .post(&config.endpoint)
        .basic_auth(&credentials.username, Some(&credentials.password))
        .json(&query)
        .send()
        .await?;

    let status = resp.status();
    if status.is_success() {
        log::info!("Proxy status code: {status}");
    } else {
        log::warn!("Proxy status code: {status}");
    }

    let body = resp.text().await?;
    log::trace!("Proxy response: {body}");

    let content = parse_content(&body, status.as_u16())?;
    log::debug!("Received {} bytes of page content", content.len());
    Ok(content)
}

/// Extracts `results[0].content` from a proxy response body.
///
/// A body that is not JSON is reported as [`ScrapeError::Json`] when the
/// status was a success, and as [`ScrapeError::MissingContent`] otherwise
/// (error pages are rarely JSON).
///
/// # Errors
///
/// Returns [`ScrapeError`] if the content field cannot be found.
pub fn parse_content(body: &str, status: u16) -> Result<String, ScrapeError> {
    let response: ProxyResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !(200..300).contains(&status) => {
            return Err(ScrapeError::MissingContent { status });
        }
        Err(e) => return Err(ScrapeError::Json(e)),
    };

    response
        .results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| first.content)
        .ok_or(ScrapeError::MissingContent { status })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TARGET: &str = "https://www.tripadvisor.com/Attractions-g1-Activities-oa0-X.html";

    fn credentials() -> ProxyCredentials {
        ProxyCredentials {
            username: "user".to_owned(),
            password: "hunter2".to_owned(),
        }
    }

    fn proxy_config(server: &MockServer) -> ProxyConfig {
        let mut config = attractions_config::AppConfig::embedded().proxy;
        config.endpoint = format!("{}/v1/queries", server.uri());
        config
    }

    #[tokio::test]
    async fn fetch_sends_basic_auth_and_query_body() {
        let server = MockServer::start().await;
        let config = proxy_config(&server);
        Mock::given(method("POST"))
            .and(path("/v1/queries"))
            .and(header("authorization", "Basic dXNlcjpodW50ZXIy"))
            .and(body_json(serde_json::json!({
                "source": config.source.as_str(),
                "url": TARGET,
                "geo_location": config.geo_location.as_str(),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{ "content": "<html>page</html>" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let html = fetch_html(&reqwest::Client::new(), &config, TARGET, &credentials())
            .await
            .unwrap();

        assert_eq!(html, "<html>page</html>");
    }

    #[tokio::test]
    async fn error_status_with_content_still_returns_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/queries"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "results": [{ "content": "<html>partial</html>" }]
            })))
            .mount(&server)
            .await;

        let html = fetch_html(
            &reqwest::Client::new(),
            &proxy_config(&server),
            TARGET,
            &credentials(),
        )
        .await
        .unwrap();

        assert_eq!(html, "<html>partial</html>");
    }

    #[tokio::test]
    async fn error_page_without_json_is_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/queries"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = fetch_html(
            &reqwest::Client::new(),
            &proxy_config(&server),
            TARGET,
            &credentials(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ScrapeError::MissingContent { status: 401 }));
    }

    #[test]
    fn parses_first_result_content() {
        let body = serde_json::json!({
            "results": [
                { "content": "<html><body>first</body></html>", "status_code": 200 },
                { "content": "<html><body>second</body></html>" }
            ]
        })
        .to_string();
        assert_eq!(
            parse_content(&body, 200).unwrap(),
            "<html><body>first</body></html>"
        );
    }

    #[test]
    fn missing_results_is_an_error() {
        let body = serde_json::json!({ "message": "Unauthorized" }).to_string();
        assert!(matches!(
            parse_content(&body, 401),
            Err(ScrapeError::MissingContent { status: 401 })
        ));
    }

    #[test]
    fn empty_results_is_an_error() {
        let body = serde_json::json!({ "results": [] }).to_string();
        assert!(matches!(
            parse_content(&body, 200),
            Err(ScrapeError::MissingContent { status: 200 })
        ));
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = serde_json::json!({ "results": [{ "status_code": 403 }] }).to_string();
        assert!(matches!(
            parse_content(&body, 200),
            Err(ScrapeError::MissingContent { .. })
        ));
    }

    #[test]
    fn success_status_with_non_json_body_is_a_json_error() {
        assert!(matches!(
            parse_content("<html></html>", 200),
            Err(ScrapeError::Json(_))
        ));
    }

    #[test]
    fn error_status_with_non_json_body_is_missing_content() {
        assert!(matches!(
            parse_content("Bad Gateway", 502),
            Err(ScrapeError::MissingContent { status: 502 })
        ));
    }

    #[test]
    fn query_body_shape() {
        let query = ProxyQuery {
            source: "universal",
            url: "https://www.tripadvisor.com/Attractions-g1-Activities-oa0-X.html",
            geo_location: "United States",
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({
                "source": "universal",
                "url": "https://www.tripadvisor.com/Attractions-g1-Activities-oa0-X.html",
                "geo_location": "United States"
            })
        );
    }

    #[test]
    fn debug_redacts_password() {
        let creds = ProxyCredentials {
            username: "user".to_owned(),
            password: "hunter2".to_owned(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}

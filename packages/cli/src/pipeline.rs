//! One scrape run: resolve (optional) -> fetch -> extract -> write.

use attractions_cli_utils::MultiProgress;
use attractions_config::AppConfig;
use attractions_scraper::{ListingSelectors, ProxyCredentials};

/// What page a run scrapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Resolve a place name and scrape its attractions page.
    Query(String),
    /// Scrape this URL as is.
    Url(String),
    /// Scrape the configured default listing page.
    Default,
}

impl Target {
    /// Picks the target from the mutually exclusive `--query` / `--url`
    /// flags.
    #[must_use]
    pub fn from_args(query: Option<String>, url: Option<String>) -> Self {
        match (query, url) {
            (Some(query), _) => Self::Query(query),
            (None, Some(url)) => Self::Url(url),
            (None, None) => Self::Default,
        }
    }
}

/// Runs one scrape and writes the table to `config.site.output_path`.
///
/// Returns the number of rows written. Nothing is written if any step
/// fails.
///
/// # Errors
///
/// Returns an error if the selectors are invalid, resolution or the fetch
/// fails, the listing and image counts differ, or the table cannot be
/// written.
pub async fn run(
    multi: &MultiProgress,
    config: &AppConfig,
    target: &Target,
    credentials: &ProxyCredentials,
) -> Result<usize, Box<dyn std::error::Error>> {
    // Fail on bad selectors before spending a proxy request.
    let selectors = ListingSelectors::from_config(&config.site.selectors)?;

    let target_url = match target {
        Target::Query(query) => {
            let client = config.client.build_client()?;
            let spinner = attractions_cli_utils::spinner(multi, &format!("Resolving '{query}'"));
            let result = attractions_resolver::resolve_target_url(
                &client,
                &config.search,
                &config.site,
                query,
            )
            .await;
            spinner.finish_and_clear();
            result?
        }
        Target::Url(url) => url.clone(),
        Target::Default => config.site.default_listing_url(),
    };

    let proxy_client = config.client.without_headers().build_client()?;
    let spinner = attractions_cli_utils::spinner(multi, "Fetching listing page");
    let result = attractions_scraper::fetch_and_extract(
        &proxy_client,
        &config.proxy,
        &selectors,
        &target_url,
        credentials,
    )
    .await;
    spinner.finish_and_clear();
    let records = result?;

    attractions_scraper::output::write_csv(&config.site.output_path, &records)?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_takes_precedence() {
        assert_eq!(
            Target::from_args(Some("Hue".to_owned()), None),
            Target::Query("Hue".to_owned())
        );
    }

    #[test]
    fn url_without_query() {
        assert_eq!(
            Target::from_args(None, Some("https://www.tripadvisor.com/x".to_owned())),
            Target::Url("https://www.tripadvisor.com/x".to_owned())
        );
    }

    #[test]
    fn neither_flag_uses_default_page() {
        assert_eq!(Target::from_args(None, None), Target::Default);
    }
}

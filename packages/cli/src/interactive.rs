//! Interactive mode.
//!
//! Asks what to scrape with `dialoguer` prompts instead of CLI flags, then
//! runs the same pipeline as `attractions scrape`.

use std::path::PathBuf;

use attractions_cli_utils::MultiProgress;
use attractions_config::AppConfig;
use dialoguer::{Input, Select};

use crate::pipeline::{self, Target};

/// How the user wants to pick the listing page.
enum TargetKind {
    Query,
    Url,
    Default,
}

impl TargetKind {
    const ALL: &[Self] = &[Self::Query, Self::Url, Self::Default];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Query => "Search by place name",
            Self::Url => "Scrape a listing URL",
            Self::Default => "Scrape the default listing page",
        }
    }
}

/// Prompts for a target, output path and credentials, then runs one
/// scrape.
///
/// # Errors
///
/// Returns an error if a prompt fails or the scrape fails.
pub async fn run(
    multi: &MultiProgress,
    mut config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Attractions Scraper");
    println!();

    let labels: Vec<&str> = TargetKind::ALL.iter().map(TargetKind::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to scrape?")
        .items(&labels)
        .default(0)
        .interact()?;

    let target = match TargetKind::ALL[idx] {
        TargetKind::Query => {
            let query: String = Input::new()
                .with_prompt("Place name")
                .interact_text()?;
            Target::Query(query)
        }
        TargetKind::Url => {
            let url: String = Input::new()
                .with_prompt("Listing URL")
                .default(config.site.default_listing_url())
                .interact_text()?;
            Target::Url(url)
        }
        TargetKind::Default => Target::Default,
    };

    let output: String = Input::new()
        .with_prompt("Output CSV")
        .default(config.site.output_path.display().to_string())
        .interact_text()?;
    config.site.output_path = PathBuf::from(output);

    let credentials = attractions_cli_utils::credentials_from_env_or_prompt()?;

    let rows = pipeline::run(multi, &config, &target, &credentials).await?;
    println!(
        "Wrote {rows} rows to {}",
        config.site.output_path.display()
    );

    Ok(())
}

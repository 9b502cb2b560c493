#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the attractions scraper.
//!
//! `attractions scrape` fetches one listing page and writes its name, rating
//! and image rows to CSV. `attractions resolve` prints the locations a place
//! name resolves to. With no subcommand the tool asks what to do.
//!
//! Uses `indicatif-log-bridge` (via [`attractions_cli_utils::init_logger`])
//! so log lines and network spinners never fight for the terminal.

mod interactive;
mod pipeline;

use std::path::PathBuf;

use attractions_config::AppConfig;
use clap::{Parser, Subcommand};

use crate::pipeline::Target;

#[derive(Parser)]
#[command(name = "attractions", about = "Attraction listing scraper")]
struct Cli {
    /// TOML file overriding the `[client]`, `[search]`, `[proxy]` or
    /// `[site]` sections of the built-in configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one attractions listing page to CSV
    Scrape {
        /// Place name to resolve to its attractions page (e.g. "Hue")
        #[arg(long, conflicts_with = "url")]
        query: Option<String>,
        /// Listing page URL to scrape directly
        #[arg(long)]
        url: Option<String>,
        /// Output CSV path (default: `search_results.csv`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Geo-location the proxy fetches the page from (default: "United States")
        #[arg(long)]
        geo_location: Option<String>,
    },
    /// Print the locations a place name resolves to, as JSON
    Resolve {
        /// Place name to search for
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = attractions_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        return interactive::run(&multi, config).await;
    };

    match command {
        Commands::Resolve { query } => {
            let client = config.client.build_client()?;
            let spinner = attractions_cli_utils::spinner(&multi, "Searching locations");
            let result = attractions_resolver::resolve(&client, &config.search, &query).await;
            spinner.finish_and_clear();

            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
        Commands::Scrape {
            query,
            url,
            output,
            geo_location,
        } => {
            if let Some(geo_location) = geo_location {
                config.proxy.geo_location = geo_location;
            }
            if let Some(output) = output {
                config.site.output_path = output;
            }

            let target = Target::from_args(query, url);
            let credentials = attractions_cli_utils::credentials_from_env_or_prompt()?;
            let rows = pipeline::run(&multi, &config, &target, &credentials).await?;
            log::info!(
                "Scrape complete: {rows} rows in {}",
                config.site.output_path.display()
            );
        }
    }

    Ok(())
}

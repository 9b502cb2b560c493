#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the attractions scraper.
//!
//! [`init_logger`] sets up `indicatif-log-bridge` so that `log::info!` and
//! friends are suspended while a [`spinner`] redraws. The credential helpers
//! read the proxy login from the environment and fall back to a prompt.

use std::time::Duration;

use attractions_scraper::ProxyCredentials;
use attractions_scraper::proxy::{self, PASSWORD_ENV, USERNAME_ENV};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while spinners redraw.
///
/// Returns the [`MultiProgress`] that all spinners must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    // Build the pretty-env-logger logger manually so we can wrap it.
    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)

    log::set_max_level(level);

    multi
}

/// Adds a spinner showing `message` and elapsed time.
///
/// Used while awaiting a single network call, whose length is unknown.
#[must_use]
pub fn spinner(multi: &MultiProgress, message: &str) -> ProgressBar {
    let bar = multi.add(ProgressBar::new_spinner());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar
}

/// Prompts for the proxy username and password. The password is not echoed.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read.
pub fn prompt_credentials() -> Result<ProxyCredentials, dialoguer::Error> {
    let username: String = Input::new()
        .with_prompt("Proxy username")
        .interact_text()?;
    let password = Password::new().with_prompt("Proxy password").interact()?;

    Ok(ProxyCredentials { username, password })
}

/// Returns proxy credentials from the environment, prompting if either
/// variable is unset or empty.
///
/// # Errors
///
/// Returns an error if the prompt fails.
pub fn credentials_from_env_or_prompt() -> Result<ProxyCredentials, dialoguer::Error> {
    if let Some(credentials) = proxy::credentials_from_env() {
        log::debug!("Using proxy credentials from {USERNAME_ENV}/{PASSWORD_ENV}");
        return Ok(credentials);
    }

    log::info!("{USERNAME_ENV}/{PASSWORD_ENV} not set");
    prompt_credentials()
}

//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `airnow` - AirNow observations API client
//! - `epa` - EPA AQS historical sample data API client
//! - `openaq` - OpenAQ measurements API client
//! - `waqi` - WAQI (aqicn.org) city page scraper
//! - `persister` - CSV output to the data directory
//!
//! Every fetcher shares one contract: `Ok(Some(..))` on data,
//! `Ok(None)` when the source had nothing for the query, `Err` on
//! transport, HTTP status or parse failure. Errors never propagate
//! past the fetcher as panics; callers decide whether to log or abort.

pub mod airnow;
pub mod epa;
pub mod openaq;
pub mod persister;
pub mod waqi;

pub use airnow::AirNowFetcher;
pub use epa::EpaFetcher;
pub use openaq::OpenAqFetcher;
pub use persister::{CsvPersister, PersistOutcome};
pub use waqi::WaqiFetcher;

use std::time::Duration;
use thiserror::Error;

/// Failure at the fetcher boundary
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// Build the shared-shape HTTP client with the configured timeout
pub(crate) fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    use anyhow::Context;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

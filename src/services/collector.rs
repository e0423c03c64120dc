//! Per-source collection jobs
//!
//! Each job walks its configured query matrix strictly sequentially,
//! sleeping between outbound calls to stay under remote rate limits.
//! A failed or empty fetch is logged and skipped; only persister I/O
//! failures abort a job.

use crate::domain::types::RecordSet;
use crate::infra::Config;
use crate::io::{AirNowFetcher, CsvPersister, EpaFetcher, OpenAqFetcher, WaqiFetcher};
use chrono::{Duration as ChronoDuration, Local};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Fetch current AirNow observations for every configured location
pub async fn run_airnow(config: &Config, persister: &CsvPersister) -> anyhow::Result<()> {
    let fetcher = AirNowFetcher::new(config)?;

    for location in &config.airnow().locations {
        info!(location = %location.name, "airnow_fetching");
        match fetcher.fetch(location).await {
            Ok(Some(records)) => {
                persister.write(&format!("airnow_{}", location.name), &records)?;
            }
            Ok(None) => info!(location = %location.name, "airnow_no_data"),
            Err(e) => warn!(location = %location.name, error = %e, "airnow_fetch_failed"),
        }
    }
    Ok(())
}

/// Fetch EPA AQS samples for every configured site and parameter over
/// the trailing lookback window
pub async fn run_epa(config: &Config, persister: &CsvPersister) -> anyhow::Result<()> {
    let fetcher = EpaFetcher::new(config)?;
    let epa = config.epa();

    let end = Local::now().date_naive();
    let start = end - ChronoDuration::days(epa.lookback_days);
    let start_date = start.format("%Y%m%d").to_string();
    let end_date = end.format("%Y%m%d").to_string();

    for site in &epa.sites {
        for parameter in &epa.parameters {
            info!(site = %site.name, parameter = %parameter.name, "epa_fetching");
            match fetcher.fetch(site, &parameter.code, &start_date, &end_date).await {
                Ok(Some(records)) => {
                    let key = format!(
                        "epa_{}_{}_{}_{}_{}_{}",
                        site.state, site.county, site.site, parameter.code, start_date, end_date
                    );
                    persister.write(&key, &records)?;
                }
                Ok(None) => info!(site = %site.name, parameter = %parameter.name, "epa_no_data"),
                Err(e) => {
                    warn!(site = %site.name, parameter = %parameter.name, error = %e, "epa_fetch_failed")
                }
            }
            sleep(Duration::from_secs(epa.delay_secs)).await;
        }
        info!(site = %site.name, "epa_site_completed");
    }
    Ok(())
}

/// Fetch OpenAQ measurements for every configured location and parameter
pub async fn run_openaq(config: &Config, persister: &CsvPersister) -> anyhow::Result<()> {
    let fetcher = OpenAqFetcher::new(config)?;
    let openaq = config.openaq();

    for location in &openaq.locations {
        for parameter in &openaq.parameters {
            info!(
                country = %location.country,
                city = %location.city.as_deref().unwrap_or("-"),
                parameter = %parameter,
                "openaq_fetching"
            );
            match fetcher.fetch(location, parameter).await {
                Ok(Some(records)) => {
                    let mut key = format!("openaq_{}", location.country);
                    if let Some(city) = &location.city {
                        key.push('_');
                        key.push_str(city);
                    }
                    key.push('_');
                    key.push_str(parameter);
                    persister.write(&key, &records)?;
                }
                Ok(None) => info!(country = %location.country, parameter = %parameter, "openaq_no_data"),
                Err(e) => {
                    warn!(country = %location.country, parameter = %parameter, error = %e, "openaq_fetch_failed")
                }
            }
            sleep(Duration::from_secs(openaq.delay_secs)).await;
        }
    }
    Ok(())
}

/// Scrape WAQI city pages, accumulating all readings into one record set
pub async fn run_waqi(config: &Config, persister: &CsvPersister) -> anyhow::Result<()> {
    let fetcher = WaqiFetcher::new(config)?;
    let waqi = config.waqi();

    let mut readings = Vec::new();
    for city in &waqi.cities {
        info!(city = %city, "waqi_scraping");
        match fetcher.fetch(city).await {
            Ok(Some(reading)) => {
                info!(city = %city, aqi = %reading.aqi, "waqi_scraped");
                readings.push(reading);
            }
            Ok(None) => warn!(city = %city, "waqi_no_aqi_value"),
            Err(e) => warn!(city = %city, error = %e, "waqi_scrape_failed"),
        }

        // Randomized delay so the scrape does not hammer the site
        let delay_secs =
            rand::thread_rng().gen_range(waqi.min_delay_secs..=waqi.max_delay_secs);
        debug!(delay_secs = %format!("{delay_secs:.2}"), "waqi_inter_request_delay");
        sleep(Duration::from_secs_f64(delay_secs)).await;
    }

    let records = RecordSet::from_readings(&readings);
    persister.write("waqi_data", &records)?;
    Ok(())
}

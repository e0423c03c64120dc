//! WAQI (aqicn.org) city page scraper
//!
//! Scrapes the public city pages rather than calling an API, so the
//! extraction depends on the site's HTML structure: the widget div
//! `#aqiwgtvalue` carries the headline AQI and `table#aqitable` lists
//! per-pollutant values. That structure is an external contract owned
//! by aqicn.org; when it changes the selectors below must be
//! revalidated against a live page.

use crate::domain::types::Reading;
use crate::infra::config::Config;
use crate::io::{http_client, FetchError};
use chrono::Local;
use scraper::{Html, Selector};
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Scraped AQI and pollutant values for one city page
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedCity {
    pub aqi: String,
    /// Pollutant name (lowercased) -> reported value, in table order
    pub pollutants: Vec<(String, String)>,
}

pub struct WaqiFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl WaqiFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.http_timeout_secs())?,
            base_url: config.waqi().base_url.clone(),
        })
    }

    /// Scrape the city page into a reading, stamped with the local time
    pub async fn fetch(&self, city: &str) -> Result<Option<Reading>, FetchError> {
        let url = format!("{}/{}/", self.base_url, city_slug(city));

        debug!(city = %city, url = %url, "waqi_request");
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .send()
            .await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }
        let html = response.text().await?;

        let scraped = match parse_city_page(&html)? {
            Some(scraped) => scraped,
            None => return Ok(None),
        };

        Ok(Some(Reading {
            city: city.to_string(),
            aqi: scraped.aqi,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            pollutants: scraped.pollutants,
        }))
    }
}

/// Format a city name the way aqicn.org URLs expect
pub fn city_slug(city: &str) -> String {
    city.to_lowercase().replace(' ', "-")
}

/// Extract the AQI value and pollutant table from a city page.
///
/// Returns `Ok(None)` when the AQI widget is absent, which is how the
/// site renders unknown cities.
pub fn parse_city_page(html: &str) -> Result<Option<ScrapedCity>, FetchError> {
    let document = Html::parse_document(html);

    let aqi_selector =
        Selector::parse("#aqiwgtvalue").map_err(|e| FetchError::Parse(e.to_string()))?;
    let aqi = match document.select(&aqi_selector).next() {
        Some(el) => el.text().collect::<String>().trim().to_string(),
        None => return Ok(None),
    };

    let row_selector =
        Selector::parse("table#aqitable tr").map_err(|e| FetchError::Parse(e.to_string()))?;
    let cell_selector = Selector::parse("td").map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut pollutants = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() >= 2 {
            pollutants.push((cells[0].to_lowercase(), cells[1].clone()));
        }
    }

    Ok(Some(ScrapedCity { aqi, pollutants }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITY_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <div id="aqiwgt">
    <div id="aqiwgtvalue"> 156 </div>
  </div>
  <table id="aqitable">
    <tr><th>Pollutant</th><th>Value</th></tr>
    <tr><td>PM2.5</td><td>78</td></tr>
    <tr><td>PM10</td><td>125</td></tr>
    <tr><td>O3</td><td>12</td></tr>
  </table>
</body></html>"#;

    #[test]
    fn test_parse_city_page() {
        let scraped = parse_city_page(CITY_PAGE).unwrap().unwrap();
        assert_eq!(scraped.aqi, "156");
        assert_eq!(
            scraped.pollutants,
            vec![
                ("pm2.5".to_string(), "78".to_string()),
                ("pm10".to_string(), "125".to_string()),
                ("o3".to_string(), "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_widget_is_no_data() {
        let html = "<html><body><p>page not found</p></body></html>";
        assert!(parse_city_page(html).unwrap().is_none());
    }

    #[test]
    fn test_page_without_pollutant_table() {
        let html = r#"<html><body><div id="aqiwgtvalue">42</div></body></html>"#;
        let scraped = parse_city_page(html).unwrap().unwrap();
        assert_eq!(scraped.aqi, "42");
        assert!(scraped.pollutants.is_empty());
    }

    #[test]
    fn test_city_slug() {
        assert_eq!(city_slug("Los Angeles"), "los-angeles");
        assert_eq!(city_slug("Beijing"), "beijing");
        assert_eq!(city_slug("Mexico City"), "mexico-city");
    }
}

//! OpenAQ measurements API client
//!
//! One GET per country/city/parameter query against the v2
//! measurements endpoint; only geolocated results are requested.

use crate::domain::types::RecordSet;
use crate::infra::config::{Config, OpenAqLocation};
use crate::io::{http_client, FetchError};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct OpenAqEnvelope {
    #[serde(default)]
    results: Vec<Value>,
}

pub struct OpenAqFetcher {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl OpenAqFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.http_timeout_secs())?,
            base_url: config.openaq().base_url.clone(),
            limit: config.openaq().limit,
        })
    }

    /// Fetch measurements for one location and pollutant parameter
    pub async fn fetch(
        &self,
        location: &OpenAqLocation,
        parameter: &str,
    ) -> Result<Option<RecordSet>, FetchError> {
        let mut params = vec![
            ("country", location.country.clone()),
            ("limit", self.limit.to_string()),
            ("has_geo", "true".to_string()),
            ("order_by", "datetime".to_string()),
            ("parameter", parameter.to_string()),
        ];
        if let Some(city) = &location.city {
            params.push(("city", city.clone()));
        }

        debug!(country = %location.country, parameter = %parameter, "openaq_request");
        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_measurements(status, &body)
    }
}

/// Decode an OpenAQ response body into a record set
pub fn decode_measurements(status: u16, body: &str) -> Result<Option<RecordSet>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let envelope: OpenAqEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if envelope.results.is_empty() {
        return Ok(None);
    }
    Ok(Some(RecordSet::from_json_records(&envelope.results)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEASUREMENTS: &str = r#"{
        "meta": {"name": "openaq-api", "page": 1, "found": 2},
        "results": [
            {"location": "US Diplomatic Post: Delhi", "parameter": "pm25", "value": 110.0,
             "unit": "µg/m³", "coordinates": {"latitude": 28.63, "longitude": 77.22},
             "date": {"utc": "2024-03-01T05:00:00Z", "local": "2024-03-01T10:30:00+05:30"}},
            {"location": "Anand Vihar", "parameter": "pm25", "value": 182.0,
             "unit": "µg/m³", "coordinates": {"latitude": 28.65, "longitude": 77.32},
             "date": {"utc": "2024-03-01T05:00:00Z", "local": "2024-03-01T10:30:00+05:30"}}
        ]
    }"#;

    #[test]
    fn test_decode_measurements() {
        let records = decode_measurements(200, MEASUREMENTS).unwrap().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.columns().contains(&"coordinates.latitude".to_string()));
        assert!(records.columns().contains(&"date.utc".to_string()));
        assert_eq!(records.rows()[1][2], "182.0");
    }

    #[test]
    fn test_empty_results_is_no_data() {
        let body = r#"{"meta": {"found": 0}, "results": []}"#;
        assert!(decode_measurements(200, body).unwrap().is_none());
    }

    #[test]
    fn test_rate_limited_status() {
        let err = decode_measurements(429, "").unwrap_err();
        assert!(matches!(err, FetchError::Status(429)));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let err = decode_measurements(200, "<html></html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}

//! AirNow current observations API client
//!
//! One GET per location against the lat/long observation endpoint.
//! The body is a JSON array of observation records; an empty array
//! means no monitors reported within the search radius.

use crate::domain::types::RecordSet;
use crate::infra::config::{AirNowLocation, Config};
use crate::io::{http_client, FetchError};
use serde_json::Value;
use tracing::debug;

pub struct AirNowFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    distance_miles: u32,
}

impl AirNowFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.http_timeout_secs())?,
            base_url: config.airnow().base_url.clone(),
            api_key: config.airnow().api_key.clone(),
            distance_miles: config.airnow().distance_miles,
        })
    }

    /// Fetch current observations around one location
    pub async fn fetch(&self, location: &AirNowLocation) -> Result<Option<RecordSet>, FetchError> {
        let params = [
            ("format", "application/json".to_string()),
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("distance", self.distance_miles.to_string()),
            ("API_KEY", self.api_key.clone()),
        ];

        debug!(location = %location.name, "airnow_request");
        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_observations(status, &body)
    }
}

/// Decode an AirNow response body into a record set
pub fn decode_observations(status: u16, body: &str) -> Result<Option<RecordSet>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let records: Vec<Value> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(RecordSet::from_json_records(&records)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSERVATIONS: &str = r#"[
        {"DateObserved": "2024-03-01", "HourObserved": 10, "ParameterName": "PM2.5",
         "AQI": 42, "Category": {"Number": 1, "Name": "Good"}},
        {"DateObserved": "2024-03-01", "HourObserved": 10, "ParameterName": "O3",
         "AQI": 35, "Category": {"Number": 1, "Name": "Good"}}
    ]"#;

    #[test]
    fn test_decode_observations() {
        let records = decode_observations(200, OBSERVATIONS).unwrap().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.columns().contains(&"ParameterName".to_string()));
        assert!(records.columns().contains(&"Category.Name".to_string()));
        assert_eq!(records.rows()[0][2], "PM2.5");
    }

    #[test]
    fn test_empty_array_is_no_data() {
        assert!(decode_observations(200, "[]").unwrap().is_none());
    }

    #[test]
    fn test_error_status_never_parses_body() {
        let err = decode_observations(403, "forbidden").unwrap_err();
        assert!(matches!(err, FetchError::Status(403)));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let err = decode_observations(200, "{not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}

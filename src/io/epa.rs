//! EPA AQS historical sample data API client
//!
//! One GET per site/parameter/date-range query. The AQS envelope is
//! `{Header: [{status, ...}], Data: [...]}`; the API reports its own
//! failures in-band through a non-"Success" header status.

use crate::domain::types::RecordSet;
use crate::infra::config::{Config, EpaSite};
use crate::io::{http_client, FetchError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct EpaEnvelope {
    #[serde(rename = "Header")]
    header: Vec<EpaHeader>,
    #[serde(rename = "Data", default)]
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct EpaHeader {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

pub struct EpaFetcher {
    client: reqwest::Client,
    base_url: String,
    email: String,
    api_key: String,
}

impl EpaFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.http_timeout_secs())?,
            base_url: config.epa().base_url.clone(),
            email: config.epa().email.clone(),
            api_key: config.epa().api_key.clone(),
        })
    }

    /// Fetch samples for one site and parameter over a date range.
    ///
    /// Dates are in YYYYMMDD format.
    pub async fn fetch(
        &self,
        site: &EpaSite,
        parameter_code: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Option<RecordSet>, FetchError> {
        let params = [
            ("email", self.email.as_str()),
            ("key", self.api_key.as_str()),
            ("param", parameter_code),
            ("bdate", start_date),
            ("edate", end_date),
            ("state", site.state.as_str()),
            ("county", site.county.as_str()),
            ("site", site.site.as_str()),
        ];

        debug!(site = %site.name, param = %parameter_code, "epa_request");
        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_samples(status, &body)
    }
}

/// Decode an AQS response body into a record set
pub fn decode_samples(status: u16, body: &str) -> Result<Option<RecordSet>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let envelope: EpaEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let header = envelope
        .header
        .first()
        .ok_or_else(|| FetchError::Parse("missing response header".to_string()))?;

    if header.status != "Success" {
        warn!(
            status = %header.status,
            message = %header.message.as_deref().unwrap_or(""),
            "epa_header_not_success"
        );
        return Ok(None);
    }

    if envelope.data.is_empty() {
        return Ok(None);
    }
    Ok(Some(RecordSet::from_json_records(&envelope.data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &str = r#"{
        "Header": [{"status": "Success", "request_time": "2024-03-01T10:00:00-05:00"}],
        "Data": [
            {"state_code": "36", "county_code": "081", "site_number": "0124",
             "parameter_code": "88101", "sample_measurement": 7.2, "units_of_measure": "Micrograms/cubic meter (LC)"},
            {"state_code": "36", "county_code": "081", "site_number": "0124",
             "parameter_code": "88101", "sample_measurement": 9.1, "units_of_measure": "Micrograms/cubic meter (LC)"}
        ]
    }"#;

    #[test]
    fn test_decode_samples() {
        let records = decode_samples(200, SAMPLES).unwrap().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.columns().contains(&"sample_measurement".to_string()));
        assert_eq!(records.rows()[1][4], "9.1");
    }

    #[test]
    fn test_failed_header_is_no_data() {
        let body = r#"{"Header": [{"status": "Failed", "message": "invalid key"}], "Data": []}"#;
        assert!(decode_samples(200, body).unwrap().is_none());
    }

    #[test]
    fn test_empty_data_is_no_data() {
        let body = r#"{"Header": [{"status": "Success"}], "Data": []}"#;
        assert!(decode_samples(200, body).unwrap().is_none());
    }

    #[test]
    fn test_missing_header_is_parse_error() {
        let body = r#"{"Header": [], "Data": []}"#;
        let err = decode_samples(200, body).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_error_status() {
        let err = decode_samples(500, "").unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }
}

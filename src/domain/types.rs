//! Shared record types for fetch results and run summaries

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Local timestamp in ISO-8601 format (microsecond precision)
pub fn iso_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// A point-in-time air quality measurement for one city.
///
/// AQI and pollutant magnitudes are kept as the strings the source
/// reported them in; they are passed through to CSV unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub city: String,
    pub aqi: String,
    pub timestamp: String,
    /// Pollutant name -> reported value, in source order
    pub pollutants: Vec<(String, String)>,
}

/// Tabular result set: ordered columns plus rows of string cells.
///
/// Columns appear in first-appearance order across records; rows are
/// padded with empty cells for columns a record does not carry.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Build a record set from an array of JSON records.
    ///
    /// Nested objects are flattened with dot-joined keys, matching the
    /// pass-through shape of the upstream APIs. Arrays and other scalars
    /// are stringified as-is; nulls become empty cells.
    pub fn from_json_records(records: &[Value]) -> Self {
        let mut set = Self::new();
        for record in records {
            let mut flat = Vec::new();
            flatten_value("", record, &mut flat);
            set.push_record(flat);
        }
        set
    }

    /// Build a record set from scraped readings.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let mut set = Self::new();
        for reading in readings {
            let mut flat = vec![
                ("city".to_string(), reading.city.clone()),
                ("aqi".to_string(), reading.aqi.clone()),
                ("timestamp".to_string(), reading.timestamp.clone()),
            ];
            flat.extend(reading.pollutants.iter().cloned());
            set.push_record(flat);
        }
        set
    }

    /// Append one flattened record, extending the column set as needed.
    fn push_record(&mut self, flat: Vec<(String, String)>) {
        let mut row = vec![String::new(); self.columns.len()];
        for (key, value) in flat {
            match self.columns.iter().position(|col| *col == key) {
                Some(i) => row[i] = value,
                None => {
                    self.columns.push(key);
                    for prior in &mut self.rows {
                        prior.push(String::new());
                    }
                    row.push(value);
                }
            }
        }
        self.rows.push(row);
    }
}

fn flatten_value(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_value(&path, child, out);
            }
        }
        other => out.push((prefix.to_string(), cell(other))),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Outcome of one source within an orchestrated run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub timestamp: String,
}

impl RunResult {
    pub fn new(success: bool) -> Self {
        Self { success, timestamp: iso_now() }
    }
}

/// Run summary written to metadata.json after each orchestrated run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub last_updated: String,
    pub api_results: BTreeMap<String, RunResult>,
}

impl RunSummary {
    pub fn new(api_results: BTreeMap<String, RunResult>) -> Self {
        Self { last_updated: iso_now(), api_results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let records = vec![json!({
            "location": "Kathmandu",
            "coordinates": {"latitude": 27.7, "longitude": 85.3},
            "value": 78.5
        })];
        let set = RecordSet::from_json_records(&records);

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.columns(),
            &["location", "coordinates.latitude", "coordinates.longitude", "value"]
        );
        assert_eq!(set.rows()[0], vec!["Kathmandu", "27.7", "85.3", "78.5"]);
    }

    #[test]
    fn test_column_union_preserves_first_appearance_order() {
        let records = vec![
            json!({"a": 1, "b": 2}),
            json!({"b": 3, "c": 4}),
        ];
        let set = RecordSet::from_json_records(&records);

        assert_eq!(set.columns(), &["a", "b", "c"]);
        // First row is padded for the column introduced later
        assert_eq!(set.rows()[0], vec!["1", "2", ""]);
        assert_eq!(set.rows()[1], vec!["", "3", "4"]);
    }

    #[test]
    fn test_null_becomes_empty_cell() {
        let records = vec![json!({"value": null, "unit": "ppm"})];
        let set = RecordSet::from_json_records(&records);
        assert_eq!(set.rows()[0], vec!["", "ppm"]);
    }

    #[test]
    fn test_from_readings() {
        let readings = vec![
            Reading {
                city: "Beijing".to_string(),
                aqi: "156".to_string(),
                timestamp: "2024-01-01 08:00:00".to_string(),
                pollutants: vec![("pm25".to_string(), "78".to_string())],
            },
            Reading {
                city: "Delhi".to_string(),
                aqi: "201".to_string(),
                timestamp: "2024-01-01 08:00:05".to_string(),
                pollutants: vec![
                    ("pm25".to_string(), "110".to_string()),
                    ("no2".to_string(), "42".to_string()),
                ],
            },
        ];
        let set = RecordSet::from_readings(&readings);

        assert_eq!(set.columns(), &["city", "aqi", "timestamp", "pm25", "no2"]);
        assert_eq!(set.rows()[0], vec!["Beijing", "156", "2024-01-01 08:00:00", "78", ""]);
        assert_eq!(set.rows()[1][4], "42");
    }

    #[test]
    fn test_empty_record_set() {
        let set = RecordSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_run_summary_serializes_all_sources() {
        let mut results = BTreeMap::new();
        results.insert("airnow".to_string(), RunResult::new(true));
        results.insert("waqi".to_string(), RunResult::new(false));
        let summary = RunSummary::new(results);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["api_results"]["airnow"]["success"], true);
        assert_eq!(json["api_results"]["waqi"]["success"], false);
        assert!(json["last_updated"].as_str().unwrap().contains('T'));
    }
}

//! CSV persister - writes record sets to the data directory
//!
//! Filenames embed a capture timestamp so repeated runs never clobber
//! earlier captures. Empty record sets are skipped, not written.

use crate::domain::types::RecordSet;
use anyhow::Context;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What the persister did with a record set
#[derive(Debug, PartialEq)]
pub enum PersistOutcome {
    Written(PathBuf),
    Skipped,
}

/// Writes tabular record sets as timestamped CSV files
pub struct CsvPersister {
    out_dir: PathBuf,
}

impl CsvPersister {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self { out_dir: out_dir.as_ref().to_path_buf() }
    }

    /// Write one record set under a naming key.
    ///
    /// Creates the output directory if absent. An empty record set is a
    /// no-op: nothing is created on disk and `Skipped` is returned.
    pub fn write(&self, key: &str, records: &RecordSet) -> anyhow::Result<PersistOutcome> {
        if records.is_empty() {
            info!(key = %key, "no_data_to_persist");
            return Ok(PersistOutcome::Skipped);
        }

        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Failed to create output directory {}", self.out_dir.display())
        })?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.out_dir.join(format!("{key}_{timestamp}.csv"));

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(records.columns())?;
        for row in records.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;

        info!(
            path = %path.display(),
            rows = %records.len(),
            columns = %records.columns().len(),
            "records_persisted"
        );
        Ok(PersistOutcome::Written(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_records() -> RecordSet {
        RecordSet::from_json_records(&[
            json!({"city": "Beijing", "aqi": 156, "pm25": 78}),
            json!({"city": "Delhi", "aqi": 201, "pm25": 110}),
        ])
    }

    #[test]
    fn test_empty_record_set_is_skipped() {
        let dir = tempdir().unwrap();
        let persister = CsvPersister::new(dir.path().join("out"));

        let outcome = persister.write("waqi_data", &RecordSet::new()).unwrap();

        assert_eq!(outcome, PersistOutcome::Skipped);
        // The skip happens before directory creation
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_write_records() {
        let dir = tempdir().unwrap();
        let persister = CsvPersister::new(dir.path());

        let outcome = persister.write("waqi_data", &sample_records()).unwrap();

        let PersistOutcome::Written(path) = outcome else {
            panic!("expected a written file");
        };
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("waqi_data_"));
        assert!(name.ends_with(".csv"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "city,aqi,pm25");
        assert_eq!(lines[1], "Beijing,156,78");
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("api_data");
        let persister = CsvPersister::new(&nested);

        persister.write("airnow_chicago", &sample_records()).unwrap();

        assert!(nested.exists());
    }
}

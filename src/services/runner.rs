//! Orchestrated run - fixed job sequence and run summary
//!
//! The mock dataset is generated first (the mock path is always taken
//! in this version), then each collection job runs in turn. One job's
//! failure never aborts the rest; every outcome lands in the
//! metadata.json run summary.

use crate::domain::types::{RunResult, RunSummary};
use crate::infra::Config;
use crate::io::CsvPersister;
use crate::services::{collector, MockDataset};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub struct Runner {
    config: Config,
    persister: CsvPersister,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let persister = CsvPersister::new(config.data_dir());
        Self { config, persister }
    }

    /// Run the mock generator and every collection job in sequence
    pub async fn run(&self) -> anyhow::Result<RunSummary> {
        let data_dir = Path::new(self.config.data_dir());

        let dataset = MockDataset::generate();
        dataset.write_all(data_dir)?;

        let mut results = BTreeMap::new();

        let outcome = collector::run_airnow(&self.config, &self.persister).await;
        results.insert("airnow".to_string(), record("airnow", outcome));

        let outcome = collector::run_epa(&self.config, &self.persister).await;
        results.insert("epa".to_string(), record("epa", outcome));

        let outcome = collector::run_openaq(&self.config, &self.persister).await;
        results.insert("openaq".to_string(), record("openaq", outcome));

        let outcome = collector::run_waqi(&self.config, &self.persister).await;
        results.insert("waqi".to_string(), record("waqi", outcome));

        let summary = RunSummary::new(results);
        write_metadata(data_dir, &summary)?;
        Ok(summary)
    }
}

/// Convert a job outcome into a summary entry, logging it either way
fn record(source: &str, outcome: anyhow::Result<()>) -> RunResult {
    match outcome {
        Ok(()) => {
            info!(source = %source, "source_completed");
            RunResult::new(true)
        }
        Err(e) => {
            error!(source = %source, error = %e, "source_failed");
            RunResult::new(false)
        }
    }
}

/// Write the run summary to metadata.json in the data directory
pub fn write_metadata(data_dir: &Path, summary: &RunSummary) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let path = data_dir.join("metadata.json");
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), sources = %summary.api_results.len(), "run_summary_written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempfile::tempdir;

    #[test]
    fn test_record_outcomes() {
        assert!(record("airnow", Ok(())).success);
        assert!(!record("waqi", Err(anyhow!("boom"))).success);
    }

    #[test]
    fn test_metadata_lists_every_source() {
        let dir = tempdir().unwrap();

        let mut results = BTreeMap::new();
        results.insert("airnow".to_string(), record("airnow", Ok(())));
        results.insert("epa".to_string(), record("epa", Err(anyhow!("connection refused"))));
        results.insert("openaq".to_string(), record("openaq", Ok(())));
        results.insert("waqi".to_string(), record("waqi", Ok(())));

        let summary = RunSummary::new(results);
        let path = write_metadata(dir.path(), &summary).unwrap();
        assert_eq!(path.file_name().unwrap(), "metadata.json");

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let api_results = parsed["api_results"].as_object().unwrap();
        assert_eq!(api_results.len(), 4);
        assert_eq!(parsed["api_results"]["airnow"]["success"], true);
        assert_eq!(parsed["api_results"]["epa"]["success"], false);
        assert_eq!(parsed["api_results"]["openaq"]["success"], true);
        assert_eq!(parsed["api_results"]["waqi"]["success"], true);
        assert!(parsed["last_updated"].is_string());
    }

    #[test]
    fn test_metadata_overwrites_previous_run() {
        let dir = tempdir().unwrap();

        let mut results = BTreeMap::new();
        results.insert("airnow".to_string(), RunResult::new(false));
        write_metadata(dir.path(), &RunSummary::new(results)).unwrap();

        let mut results = BTreeMap::new();
        results.insert("airnow".to_string(), RunResult::new(true));
        write_metadata(dir.path(), &RunSummary::new(results)).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("metadata.json")).unwrap())
                .unwrap();
        assert_eq!(parsed["api_results"]["airnow"]["success"], true);
    }
}

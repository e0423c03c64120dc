//! Standalone mock dataset generator
//!
//! Writes the dashboard JSON files and prints the combined dataset,
//! matching what a dashboard dev server expects to find on disk.

use aq_pipeline::infra::Config;
use aq_pipeline::services::MockDataset;
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Generate the mock air quality dataset
#[derive(Parser, Debug)]
#[command(name = "mockgen", version, about)]
struct Args {
    /// Path to TOML configuration file [default: config/dev.toml, or CONFIG_FILE]
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to store generated data [default: ./data/api_data]
    #[arg(long)]
    data_dir: Option<String>,

    /// Force refresh all data (accepted for compatibility)
    #[arg(long)]
    force: bool,

    /// Use mock data (accepted for compatibility; always the case)
    #[arg(long)]
    mock: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    let args = Args::parse();
    let config_path = Config::resolve_config_path(args.config.as_deref());
    let mut config = Config::load_from_path(&config_path);
    if let Some(data_dir) = &args.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let dataset = MockDataset::generate();
    dataset.write_all(Path::new(config.data_dir()))?;
    info!(
        fetch_time_seconds = %dataset.metadata.fetch_time_seconds,
        "mock dataset generation complete"
    );

    println!("{}", serde_json::to_string_pretty(&dataset)?);
    Ok(())
}

//! Air quality data pipeline - orchestrator binary
//!
//! Generates the mock dashboard dataset, then runs every source
//! collection job in a fixed sequence and writes the run summary.
//!
//! Module structure:
//! - `domain/` - Core record types (Reading, RecordSet, Route, RunResult)
//! - `io/` - External interfaces (AirNow, EPA, OpenAQ, WAQI, CSV persister)
//! - `services/` - Business logic (MockDataset, collection jobs, Runner)
//! - `infra/` - Infrastructure (Config)

use aq_pipeline::infra::Config;
use aq_pipeline::services::Runner;
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Air quality data pipeline - source collection and mock dataset generation
#[derive(Parser, Debug)]
#[command(name = "aq-pipeline", version, about)]
struct Args {
    /// Path to TOML configuration file [default: config/dev.toml, or CONFIG_FILE]
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to store fetched and generated data [default: ./data/api_data]
    #[arg(long)]
    data_dir: Option<String>,

    /// Force refresh all data (accepted for compatibility; a run always refreshes)
    #[arg(long)]
    force: bool,

    /// Use mock data (accepted for compatibility; the mock dataset is always generated)
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-request visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("aq-pipeline starting");

    let args = Args::parse();

    let config_path = Config::resolve_config_path(args.config.as_deref());
    let mut config = Config::load_from_path(&config_path);
    if let Some(data_dir) = &args.data_dir {
        config = config.with_data_dir(data_dir);
    }

    info!(
        config_file = %config.config_file(),
        data_dir = %config.data_dir(),
        git_hash = %env!("GIT_HASH"),
        "config_loaded"
    );
    if args.force || args.mock {
        info!("mock dataset is generated on every run; --force/--mock change nothing");
    }

    let runner = Runner::new(config);
    let summary = runner.run().await?;

    info!(sources = %summary.api_results.len(), "aq-pipeline run complete");
    Ok(())
}

//! Standalone WAQI scraping script

use aq_pipeline::infra::Config;
use aq_pipeline::io::CsvPersister;
use aq_pipeline::services::collector;
use clap::Parser;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Scrape WAQI city pages into one CSV capture
#[derive(Parser, Debug)]
#[command(name = "waqi", version, about)]
struct Args {
    /// Path to TOML configuration file [default: config/dev.toml, or CONFIG_FILE]
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to store fetched data [default: ./data/api_data]
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
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

    let persister = CsvPersister::new(config.data_dir());
    collector::run_waqi(&config, &persister).await?;
    Ok(())
}

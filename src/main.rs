use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use country_atlas::application::CountryPipeline;
use country_atlas::infrastructure::logging::{init_logging_with_config, log_system_info};
use country_atlas::infrastructure::{AppConfig, HttpClient};

/// Country Atlas - UN member-state dataset builder
///
/// Scrapes Japanese Wikipedia for ISO codes, capitals, flags and location maps.
#[derive(Parser, Debug)]
#[command(name = "country-atlas", author, version, about)]
struct Cli {
    /// Configuration file (defaults to <config dir>/country-atlas/config.json if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Dataset output path, overriding `output.dataset_path`
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging_with_config(&config.logging)?;
    log_system_info();

    let output = cli.output.unwrap_or_else(|| config.output.dataset_path.clone());
    let client = HttpClient::from_http_config(&config.http)?;
    let pipeline = CountryPipeline::new(client, &config);

    match pipeline.run_to_file(&output).await {
        Ok(report) => {
            info!("🎉 Done: {} countries written to {}", report.emitted, output.display());
            Ok(())
        }
        Err(e) => {
            error!("❌ Pipeline aborted, no dataset written: {}", e);
            Err(e.into())
        }
    }
}

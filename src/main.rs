use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pitwall::application::driver_analytics_service::{DriverAnalyticsService, DriverSeason};
use pitwall::config::Config;
use pitwall::domain::analytics::TrendMetric;
use pitwall::infrastructure::ergast_json::ErgastJsonSource;
use serde_json::json;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Per-driver race performance analytics", long_about = None)]
struct Cli {
    /// Directory holding <season>/<driver_id>.json result files (overrides PITWALL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analytics report for one driver
    Report {
        /// Driver id, e.g. max_verstappen
        #[arg(short, long)]
        driver: String,

        /// Season year
        #[arg(short, long)]
        season: String,

        /// Trend metric (position or points)
        #[arg(short, long)]
        metric: Option<String>,

        /// Number of recent races in the form window
        #[arg(long)]
        form_window: Option<usize>,
    },
    /// Reports for several drivers, computed in parallel
    Batch {
        /// Season year
        #[arg(short, long)]
        season: String,

        /// Driver ids (repeat or comma separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        driver: Vec<String>,
    },
    /// Trend series only
    Trends {
        #[arg(short, long)]
        driver: String,

        #[arg(short, long)]
        season: String,

        /// Trend metric (position or points)
        #[arg(short, long)]
        metric: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Stdout carries the JSON output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Pitwall {} starting...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let mut settings = config.analytics_settings();

    let data_dir = cli.data_dir.unwrap_or(config.data.data_dir);
    info!("Reading race results from {:?}", data_dir);
    let source = Arc::new(ErgastJsonSource::new(data_dir));

    match cli.command {
        Commands::Report {
            driver,
            season,
            metric,
            form_window,
        } => {
            if let Some(metric) = metric {
                settings.trend_metric = TrendMetric::from_str(&metric)?;
            }
            if let Some(window) = form_window {
                if window == 0 {
                    anyhow::bail!("--form-window must be at least 1");
                }
                settings.form_window = window;
            }

            let service = DriverAnalyticsService::new(source, settings);
            let report = service.report(&driver, &season)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Batch { season, driver } => {
            let targets: Vec<DriverSeason> = driver
                .iter()
                .map(|d| DriverSeason::new(d.trim(), &season))
                .collect();

            let service = DriverAnalyticsService::new(source, settings);
            let mut output = Vec::with_capacity(targets.len());
            for (target, report) in service.reports(&targets) {
                match report {
                    Ok(report) => output.push(json!({
                        "driver_id": target.driver_id,
                        "season": target.season,
                        "report": report,
                    })),
                    Err(e) => {
                        error!("Report for {} failed: {:#}", target.driver_id, e);
                        output.push(json!({
                            "driver_id": target.driver_id,
                            "season": target.season,
                            "error": format!("{:#}", e),
                        }));
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Trends {
            driver,
            season,
            metric,
        } => {
            let metric = match metric {
                Some(m) => TrendMetric::from_str(&m)?,
                None => settings.trend_metric,
            };
            let service = DriverAnalyticsService::new(source, settings);
            let trends = service.trends(&driver, &season, metric)?;
            println!("{}", serde_json::to_string_pretty(&trends)?);
        }
    }

    Ok(())
}

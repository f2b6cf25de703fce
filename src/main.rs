//! daily-md: writes a short daily markdown brief.
//!
//! Single-binary Tokio application that:
//! 1. Refreshes the cached next-UFC-event record (network only when stale)
//! 2. Fetches the hourly temperature forecast for the configured coordinates
//! 3. Renders the chosen forecast day and the event into `YYYY-MM-DD.md`

mod config;
mod report;

use std::path::Path;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use common::{AppConfig, EventRecord, Result};
use event_cache::{EventCache, FileStore, RecordCodec};
use open_meteo_client::OpenMeteoClient;
use report::{DailyReport, WeatherSection};
use ufc_client::UfcClient;

/// Daily markdown brief
#[derive(Parser)]
#[command(name = "daily-md", about = "Daily markdown brief: next UFC event and hourly weather")]
struct Cli {
    /// Wipe the cached event details before running.
    #[arg(long)]
    clear_cache: bool,

    /// Leave the UFC section out.
    #[arg(long)]
    skip_event: bool,

    /// Leave the weather section out.
    #[arg(long)]
    skip_weather: bool,

    /// Forecast day to report (0 = today).
    #[arg(long, default_value_t = 0)]
    day: usize,

    /// Print the report instead of writing it to the output directory.
    #[arg(long)]
    dry_run: bool,
}

type UfcEventCache = EventCache<FileStore, UfcClient>;

fn build_event_cache(cfg: &AppConfig) -> Result<UfcEventCache> {
    let fetcher = UfcClient::with_base_url(&cfg.event.base_url)?;
    Ok(EventCache::new(
        FileStore::new(&cfg.event.settings_dir),
        fetcher,
        RecordCodec::new(&cfg.event.cache_name),
        &cfg.event.settings_file,
    ))
}

async fn refresh_event(cache: &UfcEventCache, cfg: &AppConfig) -> Result<EventRecord> {
    info!("Attempting to retrieve UFC details..");
    let record = cache.refresh(&cfg.event.default_identifier).await?;
    info!("Found UFC event: {}", record.headline());
    Ok(record)
}

async fn load_weather(cfg: &AppConfig, day: usize) -> Result<WeatherSection> {
    info!("Attempting to get weather details..");
    let (lat, lon) = cfg.weather.coordinates()?;

    let client = OpenMeteoClient::with_base_url(&cfg.weather.base_url)?
        .forecast_days(cfg.weather.forecast_days);
    let forecast = client.get_forecast(lat, lon, cfg.weather.max_days).await?;
    let window = forecast.series.day_window(day)?;

    let (midnight, temp) = window.at(0)?;
    info!(
        "{} - {:.2}{} ({} forecast days available)",
        midnight,
        temp,
        window.units().temperature_2m,
        forecast.series.day_count()
    );

    Ok(WeatherSection {
        timezone: forecast.timezone,
        timezone_abbreviation: forecast.timezone_abbreviation,
        window,
    })
}

async fn run(cli: &Cli, cfg: &AppConfig) -> Result<()> {
    let today = Local::now().date_naive();

    let event = if cli.clear_cache || !cli.skip_event {
        let cache = build_event_cache(cfg)?;
        if cli.clear_cache {
            cache.clear().await?;
        }
        if cli.skip_event {
            None
        } else {
            Some(refresh_event(&cache, cfg).await?)
        }
    } else {
        None
    };

    let weather = if cli.skip_weather {
        None
    } else {
        Some(load_weather(cfg, cli.day).await?)
    };

    let report = DailyReport {
        date: today,
        event,
        weather,
    };

    if cli.dry_run {
        info!("Dry run, printing report instead of writing it");
        println!("{}", report.render());
    } else {
        info!("Creating today's markdown file..");
        let path = report.write_to(Path::new(&cfg.report.output_dir))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "daily_md=info,event_cache=info,ufc_client=info,open_meteo_client=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("daily-md starting up...");

    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Settings: {}/{} (default event {}), output: {}",
        cfg.event.settings_dir,
        cfg.event.settings_file,
        cfg.event.default_identifier,
        cfg.report.output_dir
    );

    if let Err(e) = run(&cli, &cfg).await {
        error!("Run aborted: {}", e);
        if e.is_validation() {
            error!(
                "Forecast data did not cover the request (--day {}, at most {} days served)",
                cli.day, cfg.weather.max_days
            );
        }
        std::process::exit(1);
    }

    info!("All commands executed!");
}

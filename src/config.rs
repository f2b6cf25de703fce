//! Configuration loader: merges env vars, .env file, and config.toml.

use common::{AppConfig, Error};
use std::path::Path;

fn parse_f64(raw: &str, env_name: &str) -> Result<f64, Error> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Config(format!("{env_name} must be a number")))
}

fn parse_positive_u32(raw: &str, env_name: &str) -> Result<u32, Error> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &AppConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.event.default_identifier.trim().is_empty() {
        issues.push("event.default_identifier must not be empty".into());
    }
    if config.event.cache_name.trim().is_empty() {
        issues.push("event.cache_name must not be empty".into());
    }
    if config.event.settings_file.trim().is_empty()
        || config.event.settings_file.contains(['/', '\\'])
    {
        issues.push("event.settings_file must be a plain file name".into());
    }
    if !config.event.base_url.starts_with("http") {
        issues.push("event.base_url must be an http(s) URL".into());
    }

    if let Some(lat) = config.weather.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            issues.push("weather.latitude must be in [-90,90]".into());
        }
    }
    if let Some(lon) = config.weather.longitude {
        if !(-180.0..=180.0).contains(&lon) {
            issues.push("weather.longitude must be in [-180,180]".into());
        }
    }
    if !(1..=16).contains(&config.weather.forecast_days) {
        issues.push("weather.forecast_days must be in [1,16]".into());
    }
    if config.weather.max_days == 0 {
        issues.push("weather.max_days must be > 0".into());
    }
    if !config.weather.base_url.starts_with("http") {
        issues.push("weather.base_url must be an http(s) URL".into());
    }

    if config.report.output_dir.trim().is_empty() {
        issues.push("report.output_dir must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply `DAILY_MD_*` overrides using `lookup` to read variables.
fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    if let Some(raw) = lookup("DAILY_MD_LAT") {
        config.weather.latitude = Some(parse_f64(&raw, "DAILY_MD_LAT")?);
    }
    if let Some(raw) = lookup("DAILY_MD_LONG") {
        config.weather.longitude = Some(parse_f64(&raw, "DAILY_MD_LONG")?);
    }
    if let Some(raw) = lookup("DAILY_MD_FORECAST_DAYS") {
        config.weather.forecast_days = parse_positive_u32(&raw, "DAILY_MD_FORECAST_DAYS")?;
    }
    if let Some(id) = lookup("DAILY_MD_DEFAULT_EVENT") {
        config.event.default_identifier = id.trim().to_string();
    }
    if let Some(dir) = lookup("DAILY_MD_SETTINGS_DIR") {
        config.event.settings_dir = dir;
    }
    if let Some(dir) = lookup("DAILY_MD_OUTPUT_DIR") {
        config.report.output_dir = dir;
    }
    Ok(())
}

/// Load configuration from environment and optional config file.
pub fn load_config() -> Result<AppConfig, Error> {
    // 1. Load .env file from the working directory or its parents.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    validate_config(&config)?;

    Ok(config)
}

//! Application configuration types.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Event cache settings.
    #[serde(default)]
    pub event: EventConfig,

    /// Weather forecast settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Markdown report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Event cache and event source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Event number fetched when nothing has been cached yet.
    #[serde(default = "default_identifier")]
    pub default_identifier: String,

    /// Key of the record inside the persisted envelope.
    #[serde(default = "default_cache_name")]
    pub cache_name: String,

    /// Directory holding the settings file.
    #[serde(default = "default_settings_dir")]
    pub settings_dir: String,

    /// Name of the settings file inside `settings_dir`.
    #[serde(default = "default_settings_file")]
    pub settings_file: String,

    /// Base URL of the event pages.
    #[serde(default = "default_event_base_url")]
    pub base_url: String,
}

/// Weather source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Days requested from the forecast API.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Upper bound on the number of day windows served from one series.
    #[serde(default = "default_max_days")]
    pub max_days: usize,

    /// Base URL of the forecast API.
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory that receives one `YYYY-MM-DD.md` file per day.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl WeatherConfig {
    /// Both coordinates, or a config error naming what is missing.
    pub fn coordinates(&self) -> Result<(f64, f64), Error> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            (None, Some(_)) => Err(Error::Config("weather.latitude is not set".into())),
            (Some(_), None) => Err(Error::Config("weather.longitude is not set".into())),
            (None, None) => Err(Error::Config(
                "weather coordinates are not set (DAILY_MD_LAT / DAILY_MD_LONG)".into(),
            )),
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_identifier() -> String {
    "316".into()
}
fn default_cache_name() -> String {
    "event".into()
}
fn default_settings_dir() -> String {
    ".".into()
}
fn default_settings_file() -> String {
    "settings.json".into()
}
fn default_event_base_url() -> String {
    "https://www.ufc.com".into()
}

fn default_forecast_days() -> u32 {
    7
}
fn default_max_days() -> usize {
    5
}
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com".into()
}

fn default_output_dir() -> String {
    "markdown".into()
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            default_identifier: default_identifier(),
            cache_name: default_cache_name(),
            settings_dir: default_settings_dir(),
            settings_file: default_settings_file(),
            base_url: default_event_base_url(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            forecast_days: default_forecast_days(),
            max_days: default_max_days(),
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(cfg.event.default_identifier, "316");
        assert_eq!(cfg.event.cache_name, "event");
        assert_eq!(cfg.event.settings_file, "settings.json");
        assert_eq!(cfg.weather.forecast_days, 7);
        assert_eq!(cfg.weather.max_days, 5);
        assert_eq!(cfg.report.output_dir, "markdown");
    }

    #[test]
    fn test_coordinates_require_both() {
        let mut weather = WeatherConfig::default();
        assert!(weather.coordinates().is_err());

        weather.latitude = Some(51.5);
        assert!(weather.coordinates().is_err());

        weather.longitude = Some(-0.12);
        assert_eq!(weather.coordinates().expect("both set"), (51.5, -0.12));
    }
}

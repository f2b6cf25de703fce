//! Open-Meteo forecast client.
//!
//! Fetches hourly 2 m temperatures for a coordinate pair and reshapes the
//! response into a [`TimeSeries`] that can be cut into calendar days.

pub mod clock;
pub mod series;

pub use clock::{twelve_hour, Timestamp};
pub use series::{DayWindow, HourlyUnits, TimeSeries, HOURS_PER_DAY};

use common::{Error, Result};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";
const DEFAULT_FORECAST_DAYS: u32 = 7;

/// Open-Meteo API client.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    forecast_days: u32,
}

// ── Open-Meteo response types ─────────────────────────────────────────

/// Response from `/v1/forecast?hourly=temperature_2m`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "generationtime_ms", alias = "generation_time_ms", default)]
    pub generation_time_ms: f64,
    /// Signed offset of `timezone` from UTC.
    #[serde(default)]
    pub utc_offset_seconds: i64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub timezone_abbreviation: String,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub hourly_units: HourlyUnits,
    pub hourly: HourlyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<Timestamp>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
}

/// A forecast with its hourly block reshaped into a [`TimeSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub generation_time_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub series: TimeSeries,
}

impl WeatherResponse {
    pub fn into_forecast(self) -> Forecast {
        Forecast {
            latitude: self.latitude,
            longitude: self.longitude,
            generation_time_ms: self.generation_time_ms,
            utc_offset_seconds: self.utc_offset_seconds,
            timezone: self.timezone,
            timezone_abbreviation: self.timezone_abbreviation,
            elevation: self.elevation,
            series: TimeSeries::new(
                self.hourly_units,
                self.hourly.time,
                self.hourly.temperature_2m,
            ),
        }
    }
}

// ── Implementation ────────────────────────────────────────────────────

impl OpenMeteoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a different host (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("daily-md/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http(format!("failed to build Open-Meteo HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
        })
    }

    /// Number of days requested per forecast (the API accepts 1-16).
    pub fn forecast_days(mut self, days: u32) -> Self {
        self.forecast_days = days;
        self
    }

    /// Fetch the raw hourly forecast for a coordinate pair.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherResponse> {
        let url = format!("{}/v1/forecast", self.base_url);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", "temperature_2m".to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ];

        debug!(
            "Fetching Open-Meteo hourly forecast: {} lat={} lon={}",
            url, latitude, longitude
        );

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Weather(format!("HTTP error for ({latitude},{longitude}): {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Weather(format!(
                "Open-Meteo returned {} for ({latitude},{longitude}): {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let data: WeatherResponse = resp.json().await.map_err(|e| {
            Error::Weather(format!("JSON parse error for ({latitude},{longitude}): {e}"))
        })?;

        debug!(
            "Got {} hourly samples ({}) for ({},{})",
            data.hourly.time.len(),
            data.timezone,
            latitude,
            longitude
        );

        Ok(data)
    }

    /// Fetch and reshape into a validated forecast.
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        max_days: usize,
    ) -> Result<Forecast> {
        let mut forecast = self.fetch(latitude, longitude).await?.into_forecast();
        forecast.series = forecast.series.with_max_days(max_days);
        forecast.series.validate()?;
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> &'static str {
        r#"{
            "latitude": 51.5,
            "longitude": -0.12,
            "generationtime_ms": 0.0315,
            "utc_offset_seconds": 3600,
            "timezone": "Europe/London",
            "timezone_abbreviation": "BST",
            "elevation": 23.0,
            "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
            "hourly": {
                "time": ["2025-06-07T00:00", "2025-06-07T01:00", "2025-06-07T02:00"],
                "temperature_2m": [14.1, 13.8, 13.2]
            }
        }"#
    }

    #[test]
    fn test_deserialize_forecast_response() {
        let parsed: WeatherResponse =
            serde_json::from_str(sample_response()).expect("response should deserialize");

        assert_eq!(parsed.utc_offset_seconds, 3600);
        assert_eq!(parsed.timezone_abbreviation, "BST");
        assert!((parsed.generation_time_ms - 0.0315).abs() < 1e-9);
        assert_eq!(parsed.hourly_units.temperature_2m, "°C");
        assert_eq!(parsed.hourly.time.len(), 3);
    }

    #[test]
    fn test_into_forecast_keeps_series() {
        let parsed: WeatherResponse =
            serde_json::from_str(sample_response()).expect("response should deserialize");
        let forecast = parsed.into_forecast();

        assert_eq!(forecast.timezone, "Europe/London");
        assert_eq!(forecast.series.len(), 3);
        let (ts, temp) = forecast.series.at(1).expect("second sample");
        assert_eq!(ts.as_str(), "2025-06-07T01:00");
        assert!((temp - 13.8).abs() < 1e-9);
        // Three samples never make a full day.
        assert_eq!(forecast.series.day_count(), 0);
    }

    #[test]
    fn test_negative_utc_offset() {
        let raw = sample_response().replace("3600", "-18000");
        let parsed: WeatherResponse = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed.utc_offset_seconds, -18000);
    }
}

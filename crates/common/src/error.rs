//! Unified error type for daily-md.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Event fetch failed: {0}")]
    Fetch(String),

    #[error("Open-Meteo API error: {0}")]
    Weather(String),

    #[error("Series length mismatch: {timestamps} timestamps vs {values} values")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("Day {day} out of range ({available} complete days available)")]
    DayOutOfRange { day: usize, available: usize },

    #[error("Hour {hour} out of range (0-23)")]
    HourOutOfRange { hour: usize },

    #[error("Sample {index} out of range ({len} samples)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid timestamp token: {0}")]
    InvalidTimestamp(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for the series/window bounds and integrity failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::LengthMismatch { .. }
                | Error::DayOutOfRange { .. }
                | Error::HourOutOfRange { .. }
                | Error::IndexOutOfRange { .. }
        )
    }
}

//! Hourly time series and its calendar-day windows.

use common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// Samples in one day window.
pub const HOURS_PER_DAY: usize = 24;

/// Unit labels for the hourly block (`"iso8601"`, `"°C"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyUnits {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub temperature_2m: String,
}

/// Parallel timestamp/value sequences of hourly samples starting at hour 0.
///
/// Construction does not check the lengths; every accessor validates first
/// so a mismatched series is never silently truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    units: HourlyUnits,
    timestamps: Vec<Timestamp>,
    values: Vec<f64>,
    max_days: Option<usize>,
}

impl TimeSeries {
    pub fn new(units: HourlyUnits, timestamps: Vec<Timestamp>, values: Vec<f64>) -> Self {
        Self {
            units,
            timestamps,
            values,
            max_days: None,
        }
    }

    /// Cap the number of day windows served, regardless of series length.
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = Some(max_days);
        self
    }

    pub fn units(&self) -> &HourlyUnits {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.timestamps.len() != self.values.len() {
            return Err(Error::LengthMismatch {
                timestamps: self.timestamps.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    /// The sample at `pos` in the whole series.
    pub fn at(&self, pos: usize) -> Result<(&Timestamp, f64)> {
        self.validate()?;
        match (self.timestamps.get(pos), self.values.get(pos)) {
            (Some(ts), Some(value)) => Ok((ts, *value)),
            _ => Err(Error::IndexOutOfRange {
                index: pos,
                len: self.len(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Timestamp, f64)> {
        self.timestamps.iter().zip(self.values.iter().copied())
    }

    /// Number of complete day windows available, after the optional cap.
    pub fn day_count(&self) -> usize {
        let complete = self.timestamps.len().min(self.values.len()) / HOURS_PER_DAY;
        match self.max_days {
            Some(max) => complete.min(max),
            None => complete,
        }
    }

    /// Samples `[day * 24, (day + 1) * 24)` as a day window.
    pub fn day_window(&self, day: usize) -> Result<DayWindow> {
        self.validate()?;

        let available = self.day_count();
        if day >= available {
            return Err(Error::DayOutOfRange { day, available });
        }

        let range = day * HOURS_PER_DAY..(day + 1) * HOURS_PER_DAY;
        DayWindow::from_slices(
            day,
            self.units.clone(),
            &self.timestamps[range.clone()],
            &self.values[range],
        )
    }
}

/// Exactly one day of hourly samples, indexed by hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    day: usize,
    units: HourlyUnits,
    timestamps: [Timestamp; HOURS_PER_DAY],
    values: [f64; HOURS_PER_DAY],
}

impl DayWindow {
    /// Build from two slices that must each hold exactly 24 samples.
    pub fn from_slices(
        day: usize,
        units: HourlyUnits,
        timestamps: &[Timestamp],
        values: &[f64],
    ) -> Result<Self> {
        let mismatch = || Error::LengthMismatch {
            timestamps: timestamps.len(),
            values: values.len(),
        };

        let timestamps: [Timestamp; HOURS_PER_DAY] =
            timestamps.to_vec().try_into().map_err(|_| mismatch())?;
        let values: [f64; HOURS_PER_DAY] = values.try_into().map_err(|_| mismatch())?;

        Ok(Self {
            day,
            units,
            timestamps,
            values,
        })
    }

    /// Zero-based day offset within the source series.
    pub fn day(&self) -> usize {
        self.day
    }

    pub fn units(&self) -> &HourlyUnits {
        &self.units
    }

    /// Calendar date of the window, taken from its first sample.
    pub fn date(&self) -> Result<&str> {
        self.timestamps[0].date()
    }

    pub fn at(&self, hour: usize) -> Result<(&Timestamp, f64)> {
        if hour >= HOURS_PER_DAY {
            return Err(Error::HourOutOfRange { hour });
        }
        Ok((&self.timestamps[hour], self.values[hour]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Timestamp, f64)> {
        self.timestamps.iter().zip(self.values.iter().copied())
    }

    pub fn high(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn low(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

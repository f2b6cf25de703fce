//! Timestamp tokens and 12-hour clock rendering.

use std::fmt;

use common::{Error, Result};
use serde::{Deserialize, Serialize};

/// An hourly timestamp token as returned by the API, e.g. `2025-06-07T13:00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the date part and the `HH:MM` part.
    pub fn split(&self) -> Result<(&str, &str)> {
        self.0
            .split_once('T')
            .filter(|(date, clock)| !date.is_empty() && !clock.is_empty())
            .ok_or_else(|| Error::InvalidTimestamp(self.0.clone()))
    }

    pub fn date(&self) -> Result<&str> {
        Ok(self.split()?.0)
    }

    /// Time of day on a 12-hour clock, e.g. `01:00 PM`.
    pub fn clock(&self) -> Result<String> {
        twelve_hour(self.split()?.1)
    }
}

impl fmt::Display for Timestamp {
    /// `2025-06-07 at 01:00 PM`; malformed tokens are shown verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.date(), self.clock()) {
            (Ok(date), Ok(clock)) => write!(f, "{} at {}", date, clock),
            _ => f.write_str(&self.0),
        }
    }
}

/// Render `HH:MM` (24-hour) as `hh:MM AM|PM`.
///
/// Midnight is `12 AM`, noon is `12 PM`. The minute field is kept verbatim.
pub fn twelve_hour(hour_minute: &str) -> Result<String> {
    let invalid = || Error::InvalidTimestamp(hour_minute.to_string());

    let (hour, minute) = hour_minute.split_once(':').ok_or_else(invalid)?;
    if minute.is_empty() {
        return Err(invalid());
    }
    let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;

    let (hour, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        13..=23 => (hour - 12, "PM"),
        _ => return Err(invalid()),
    };

    Ok(format!("{:02}:{} {}", hour, minute, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_hour_rendering() {
        let cases = [
            ("00:15", "12:15 AM"),
            ("01:00", "01:00 AM"),
            ("09:30", "09:30 AM"),
            ("12:00", "12:00 PM"),
            ("13:05", "01:05 PM"),
            ("23:59", "11:59 PM"),
        ];
        for (input, expected) in cases {
            assert_eq!(twelve_hour(input).expect(input), expected);
        }
    }

    #[test]
    fn test_twelve_hour_rejects_garbage() {
        for input in ["", "1300", "24:00", "ab:00", "07:"] {
            assert!(twelve_hour(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_timestamp_split_and_display() {
        let ts = Timestamp::new("2025-06-07T13:00");
        assert_eq!(ts.split().expect("split"), ("2025-06-07", "13:00"));
        assert_eq!(ts.date().expect("date"), "2025-06-07");
        assert_eq!(ts.to_string(), "2025-06-07 at 01:00 PM");
    }

    #[test]
    fn test_malformed_timestamp_displays_raw() {
        let ts = Timestamp::new("yesterday");
        assert!(matches!(ts.split(), Err(Error::InvalidTimestamp(_))));
        assert_eq!(ts.to_string(), "yesterday");
    }
}

//! Daily markdown report.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use common::{Error, EventRecord, Result};
use open_meteo_client::DayWindow;

/// Weather block of the report: one day window plus where it applies.
#[derive(Debug, Clone)]
pub struct WeatherSection {
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub window: DayWindow,
}

/// Everything that goes into one `YYYY-MM-DD.md` file.
#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub event: Option<EventRecord>,
    pub weather: Option<WeatherSection>,
}

impl DailyReport {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.date.format("%Y-%m-%d"))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "# {}", self.date.format("%Y-%m-%d"));

        if let Some(event) = &self.event {
            let _ = writeln!(out, "\n## UFC\n\n{}", event.headline());
        }

        if let Some(weather) = &self.weather {
            let window = &weather.window;
            let unit = &window.units().temperature_2m;
            let day = window.date().unwrap_or("unknown date");

            let _ = writeln!(
                out,
                "\n## Weather for {} ({}, {})\n",
                day, weather.timezone, weather.timezone_abbreviation
            );
            let _ = writeln!(
                out,
                "High {:.1}{unit} / Low {:.1}{unit}\n",
                window.high(),
                window.low()
            );
            for (ts, temp) in window.iter() {
                let _ = writeln!(out, "- {}, {:.1}{}", ts, temp, unit);
            }
        }

        out
    }

    /// Write the report into `dir`, replacing any file for the same day.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| {
            Error::Other(format!("failed to create {}: {}", dir.display(), e))
        })?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use open_meteo_client::{HourlyUnits, TimeSeries, Timestamp};
    use tempfile::TempDir;

    fn window() -> DayWindow {
        let timestamps = (0..24)
            .map(|h| Timestamp::new(format!("2025-06-07T{:02}:00", h)))
            .collect();
        let values = (0..24).map(|h| 10.0 + h as f64 / 2.0).collect();
        let units = HourlyUnits {
            time: "iso8601".into(),
            temperature_2m: "°C".into(),
        };
        TimeSeries::new(units, timestamps, values)
            .day_window(0)
            .expect("one full day")
    }

    fn report() -> DailyReport {
        DailyReport {
            date: NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date"),
            event: Some(EventRecord {
                identifier: "316".into(),
                title: "Dvalishvili vs O'Malley 2".into(),
                location: "Prudential Center Newark, NJ".into(),
                display_date: "Sat, Jun 7 / 8:00 PM EDT".into(),
                stale_at: Some(1_749_340_800),
            }),
            weather: Some(WeatherSection {
                timezone: "America/New_York".into(),
                timezone_abbreviation: "EDT".into(),
                window: window(),
            }),
        }
    }

    #[test]
    fn test_render_sections() {
        let text = report().render();

        assert!(text.starts_with("# 2025-06-07\n"));
        assert!(text.contains(
            "UFC 316 - Dvalishvili vs O'Malley 2 | Sat, Jun 7 / 8:00 PM EDT | Prudential Center Newark, NJ"
        ));
        assert!(text.contains("## Weather for 2025-06-07 (America/New_York, EDT)"));
        assert!(text.contains("High 21.5°C / Low 10.0°C"));
        assert!(text.contains("- 2025-06-07 at 12:00 AM, 10.0°C"));
        assert!(text.contains("- 2025-06-07 at 01:00 PM, 16.5°C"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 24);
    }

    #[test]
    fn test_render_without_sections() {
        let mut r = report();
        r.event = None;
        r.weather = None;
        assert_eq!(r.render(), "# 2025-06-07\n");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().expect("tempdir");
        let out = dir.path().join("markdown");
        fs::create_dir_all(&out).expect("mkdir");
        fs::write(out.join("2025-06-07.md"), "stale contents").expect("seed");

        let path = report().write_to(&out).expect("write");

        assert_eq!(path, out.join("2025-06-07.md"));
        let written = fs::read_to_string(path).expect("read back");
        assert!(written.starts_with("# 2025-06-07"));
        assert!(!written.contains("stale contents"));
    }
}

//! Domain types shared across the workspace.

use serde::{Deserialize, Serialize};

// ── Event Types ───────────────────────────────────────────────────────

/// The single cached record describing an upcoming event.
///
/// `identifier` is the stable key used to decide whether two records describe
/// the same event. `stale_at` is the Unix epoch (seconds) after which the
/// record must be re-fetched; `None` means "unknown", which is always stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub identifier: String,
    pub title: String,
    pub location: String,
    pub display_date: String,
    pub stale_at: Option<i64>,
}

impl EventRecord {
    /// True for the first-run record with no fields populated.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_empty()
            && self.title.is_empty()
            && self.location.is_empty()
            && self.display_date.is_empty()
            && self.stale_at.is_none()
    }

    /// One-line summary, e.g. `UFC 316 - Dvalishvili vs O'Malley 2 | Sat, Jun 7 | Newark`.
    pub fn headline(&self) -> String {
        format!(
            "UFC {} - {} | {} | {}",
            self.identifier, self.title, self.display_date, self.location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        assert!(EventRecord::default().is_empty());

        let record = EventRecord {
            identifier: "316".into(),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn test_headline_format() {
        let record = EventRecord {
            identifier: "316".into(),
            title: "Dvalishvili vs O'Malley 2".into(),
            location: "Prudential Center Newark, NJ".into(),
            display_date: "Sat, Jun 7 / 10:00 PM EDT".into(),
            stale_at: Some(1_749_348_000),
        };
        assert_eq!(
            record.headline(),
            "UFC 316 - Dvalishvili vs O'Malley 2 | Sat, Jun 7 / 10:00 PM EDT | Prudential Center Newark, NJ"
        );
    }
}

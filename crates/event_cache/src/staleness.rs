//! Expiry check for the cached event.

use chrono::Utc;
use common::EventRecord;

/// Current wall-clock time as Unix epoch seconds.
pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Whether `record` must be re-fetched at `now` (epoch seconds).
///
/// A record without an expiry is always stale, which also covers the empty
/// first-run record. Expiry is inclusive: at `now == stale_at` the record is
/// already stale.
pub fn is_stale(record: &EventRecord, now: i64) -> bool {
    match record.stale_at {
        Some(stale_at) => now >= stale_at,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_expiring_at(stale_at: Option<i64>) -> EventRecord {
        EventRecord {
            identifier: "316".into(),
            stale_at,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_expiry_is_stale() {
        let now = 1_750_000_000;
        assert!(is_stale(&EventRecord::default(), now));
        assert!(is_stale(&record_expiring_at(None), now));
    }

    #[test]
    fn test_expiry_boundaries() {
        let now = 1_750_000_000;
        assert!(is_stale(&record_expiring_at(Some(now - 1)), now));
        assert!(is_stale(&record_expiring_at(Some(now)), now));
        assert!(!is_stale(&record_expiring_at(Some(now + 1)), now));
    }

    #[test]
    fn test_now_epoch_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(now_epoch() > 1_704_067_200);
    }
}

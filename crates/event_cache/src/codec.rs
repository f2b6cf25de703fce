//! Envelope (de)serialization.
//!
//! The persisted form is a JSON object keyed by the cache name whose value
//! holds string fields only:
//!
//! ```json
//! {"event":{"number":"316","title":"...","venue":"...","date":"...","timestamp":"1749348000"}}
//! ```
//!
//! `timestamp` stays a string on disk and becomes `Option<i64>` in memory.

use common::{Error, EventRecord, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The persisted unit: one named record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub name: String,
    pub record: EventRecord,
}

/// Wire shape of a record inside the envelope.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedEvent {
    #[serde(default)]
    number: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    venue: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    timestamp: String,
}

impl From<PersistedEvent> for EventRecord {
    fn from(p: PersistedEvent) -> Self {
        // Unparseable timestamps ("", "None") are kept as unknown expiry.
        let stale_at = p.timestamp.trim().parse::<i64>().ok();
        EventRecord {
            identifier: p.number,
            title: p.title,
            location: p.venue,
            display_date: p.date,
            stale_at,
        }
    }
}

impl From<&EventRecord> for PersistedEvent {
    fn from(r: &EventRecord) -> Self {
        PersistedEvent {
            number: r.identifier.clone(),
            title: r.title.clone(),
            venue: r.location.clone(),
            date: r.display_date.clone(),
            timestamp: r.stale_at.map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

/// Codec for the envelope stored under one cache name.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    cache_name: String,
}

impl RecordCodec {
    pub fn new(cache_name: impl Into<String>) -> Self {
        Self {
            cache_name: cache_name.into(),
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// Envelope holding the empty first-run record.
    pub fn empty(&self) -> Envelope {
        Envelope {
            name: self.cache_name.clone(),
            record: EventRecord::default(),
        }
    }

    /// Decode a persisted blob.
    ///
    /// Zero-length (or whitespace-only) input is the first-run case and
    /// yields an empty envelope. Anything else must be a JSON object, and a
    /// malformed blob is reported as `Error::Decode`. Only the entry under
    /// this cache name is interpreted: other top-level keys are ignored
    /// whatever their shape, and an object without our entry yields the empty
    /// record.
    pub fn decode(&self, bytes: &[u8]) -> Result<Envelope> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(self.empty());
        }

        let mut entries: Map<String, Value> = serde_json::from_slice(bytes)
            .map_err(|e| Error::Decode(format!("settings for '{}': {}", self.cache_name, e)))?;

        let record = match entries.remove(&self.cache_name) {
            Some(entry) => serde_json::from_value::<PersistedEvent>(entry)
                .map(EventRecord::from)
                .map_err(|e| Error::Decode(format!("'{}' entry: {}", self.cache_name, e)))?,
            None => EventRecord::default(),
        };

        Ok(Envelope {
            name: self.cache_name.clone(),
            record,
        })
    }

    /// Serialize the full envelope under this codec's cache name.
    ///
    /// An envelope carrying a different name is rejected, since `decode`
    /// would never find it again.
    pub fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        if envelope.name != self.cache_name {
            return Err(Error::Persistence(format!(
                "envelope '{}' does not belong to cache '{}'",
                envelope.name, self.cache_name
            )));
        }

        let mut entries = Map::new();
        entries.insert(
            self.cache_name.clone(),
            serde_json::to_value(PersistedEvent::from(&envelope.record))?,
        );
        Ok(serde_json::to_vec(&entries)?)
    }
}

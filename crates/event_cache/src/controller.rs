//! Read-check-fetch-write orchestration.

use common::{Error, EventRecord, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::codec::{Envelope, RecordCodec};
use crate::fetcher::EventFetcher;
use crate::staleness::{is_stale, now_epoch};
use crate::store::PersistenceProvider;

/// Single-entry event cache over a persistence provider and an event source.
///
/// Every operation holds `guard` across its read-decide-write sequence, so a
/// refresh issues at most one fetch and one write even with concurrent
/// callers in the same process.
pub struct EventCache<S, F> {
    store: S,
    fetcher: F,
    codec: RecordCodec,
    resource: String,
    guard: Mutex<()>,
}

impl<S, F> EventCache<S, F>
where
    S: PersistenceProvider,
    F: EventFetcher,
{
    /// `resource` is the blob name handed to the store (e.g. `settings.json`).
    pub fn new(store: S, fetcher: F, codec: RecordCodec, resource: impl Into<String>) -> Self {
        Self {
            store,
            fetcher,
            codec,
            resource: resource.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The persisted record as-is, without any staleness check.
    pub async fn current(&self) -> Result<EventRecord> {
        let _guard = self.guard.lock().await;
        self.load()
    }

    /// Return the cached record, re-fetching it first if it is stale.
    pub async fn refresh(&self, default_identifier: &str) -> Result<EventRecord> {
        self.refresh_at(default_identifier, now_epoch()).await
    }

    /// `refresh` against an explicit clock (epoch seconds).
    pub async fn refresh_at(&self, default_identifier: &str, now: i64) -> Result<EventRecord> {
        let _guard = self.guard.lock().await;

        debug!("Reading saved event details..");
        let current = self.load()?;
        if !is_stale(&current, now) {
            info!("Event {} details are already current", current.identifier);
            return Ok(current);
        }

        let identifier = if !current.identifier.is_empty() {
            current.identifier.clone()
        } else if !default_identifier.trim().is_empty() {
            default_identifier.trim().to_string()
        } else {
            return Err(Error::Fetch(
                "no cached event number and no default to fall back to".into(),
            ));
        };

        info!("Event details are not current, fetching event {}", identifier);
        let mut fetched = self.fetcher.fetch(&identifier).await?;
        if fetched.identifier.is_empty() {
            fetched.identifier = identifier;
        }

        self.write_if_changed(&current, &fetched, now)?;
        Ok(fetched)
    }

    /// Persist `record` unless it merely re-validates the fresh persisted one,
    /// judged at `now` (epoch seconds).
    ///
    /// Returns whether a write happened.
    pub async fn persist_at(&self, record: &EventRecord, now: i64) -> Result<bool> {
        let _guard = self.guard.lock().await;
        let current = self.load()?;
        self.write_if_changed(&current, record, now)
    }

    /// Wipe the persisted envelope; the next refresh behaves like a first run.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.guard.lock().await;
        info!("Clearing cached event details");
        self.store.clear(&self.resource)
    }

    fn load(&self) -> Result<EventRecord> {
        let bytes = self.store.read(&self.resource)?;
        Ok(self.codec.decode(&bytes)?.record)
    }

    fn write_if_changed(
        &self,
        current: &EventRecord,
        record: &EventRecord,
        now: i64,
    ) -> Result<bool> {
        if !is_stale(record, now)
            && !is_stale(current, now)
            && current.identifier == record.identifier
        {
            info!(
                "Not updating event {} details as the event has not passed",
                record.identifier
            );
            return Ok(false);
        }

        info!("Updating event {} details", record.identifier);
        let bytes = self.codec.encode(&Envelope {
            name: self.codec.cache_name().to_string(),
            record: record.clone(),
        })?;
        self.store.write(&self.resource, &bytes)?;
        Ok(true)
    }
}

//! Single-entry, staleness-gated event cache.
//!
//! Keeps one event record in a persisted envelope and only goes back to the
//! event source once the record's expiry has passed.

pub mod codec;
pub mod controller;
pub mod fetcher;
pub mod staleness;
pub mod store;

pub use codec::{Envelope, RecordCodec};
pub use controller::EventCache;
pub use fetcher::EventFetcher;
pub use staleness::{is_stale, now_epoch};
pub use store::{FileStore, MemoryStore, PersistenceProvider};

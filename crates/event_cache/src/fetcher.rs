//! Event source abstraction.

use async_trait::async_trait;
use common::{EventRecord, Result};

/// Produces a freshly observed event record for an event number.
///
/// Implementations return `Error::Fetch` (or `Error::Http`) on failure; the
/// cache never retries.
#[async_trait]
pub trait EventFetcher: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<EventRecord>;
}

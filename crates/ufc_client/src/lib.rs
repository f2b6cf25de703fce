//! UFC event page client.
//!
//! Fetches `/event/ufc-<number>` and extracts the headline, date, venue and
//! start timestamp into an [`EventRecord`].

pub mod sanitize;

use async_trait::async_trait;
use common::{Error, EventRecord, Result};
use event_cache::EventFetcher;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub use sanitize::{sanitize, sanitize_title};

const DEFAULT_BASE_URL: &str = "https://www.ufc.com";

const EVENT_NODE: &str = "div[class*='node--type-event']";
const TITLE: &str = "div[class*='headline'] > .e-divider";
const DATE: &str = "div[class*='suffix'][data-locale='en-can']";
const VENUE: &str = "div[class*='hero__text']";
const TIMESTAMP_ATTR: &str = "data-timestamp";

/// HTTP client for UFC event pages.
#[derive(Debug, Clone)]
pub struct UfcClient {
    client: reqwest::Client,
    base_url: String,
}

impl UfcClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("daily-md/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http(format!("failed to build UFC HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn event_url(&self, number: &str) -> String {
        format!("{}/event/ufc-{}", self.base_url, number)
    }

    /// Download the raw event page.
    pub async fn fetch_page(&self, number: &str) -> Result<String> {
        let url = self.event_url(number);
        debug!("Using url: {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("HTTP error for UFC {number}: {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(Error::Fetch(format!(
                "UFC returned {} for event {}",
                status, number
            )));
        }

        resp.text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read UFC {number} page: {e}")))
    }
}

#[async_trait]
impl EventFetcher for UfcClient {
    async fn fetch(&self, identifier: &str) -> Result<EventRecord> {
        let page = self.fetch_page(identifier).await?;
        parse_event_page(identifier, &page)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Fetch(format!("invalid selector {css}: {e:?}")))
}

/// Trimmed text of every element under `scope` matching `sel`.
fn child_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    scope
        .select(sel)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn child_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .find_map(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Extract the event record for `number` from an event page.
///
/// A page without the event block is an error. A missing or non-numeric
/// `data-timestamp` leaves `stale_at` empty, so the record stays stale.
pub fn parse_event_page(number: &str, page: &str) -> Result<EventRecord> {
    let document = Html::parse_document(page);
    let event_node = selector(EVENT_NODE)?;
    let title_sel = selector(TITLE)?;
    let date_sel = selector(DATE)?;
    let venue_sel = selector(VENUE)?;

    let node = document
        .select(&event_node)
        .next()
        .ok_or_else(|| Error::Fetch(format!("no event details found for UFC {number}")))?;

    let title = sanitize_title(&child_text(node, &title_sel));
    let display_date = sanitize(&child_text(node, &date_sel));
    let location = sanitize(&child_text(node, &venue_sel));
    let stale_at = child_attr(node, &date_sel, TIMESTAMP_ATTR)
        .map(|raw| sanitize(&raw))
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    debug!(
        "UFC {}: title={:?} date={:?} venue={:?} timestamp={:?}",
        number, title, display_date, location, stale_at
    );

    Ok(EventRecord {
        identifier: number.to_string(),
        title,
        location,
        display_date,
        stale_at,
    })
}

use std::time::Duration;

use marquee_browser::{is_wait_timeout, Driver};
use marquee_common::{ScrapeConfig, ScrapeError};
use serde::Serialize;
use tracing::{debug, info};

use crate::session::PageSession;

/// Meta tag convention link-preview generators use for a page's
/// representative image.
const SOCIAL_PREVIEW_META: &str = r#"meta[property="og:image"]"#;

/// Inline fallback: image sources that look like a banner asset.
const INLINE_IMAGE_FALLBACK: &str = r#"img[src*="header"], img[src*="main"], img[src*="hero"]"#;

/// Time-of-day fragments the venue prints next to its event dates. This is
/// a narrow site heuristic, not a date parser.
const DATE_TIME_MARKERS: [&str; 2] = ["05:30", "23:30"];

/// Ticket-vendor boilerplate ("tickets") stripped from page titles.
const TICKET_VENDOR_PREFIX: &str = "כרטיסים ";

/// Metadata pulled off one event page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    /// Cleaned page title; never empty.
    pub event_name: String,
    /// First image located by the fallback chain.
    pub image_url: Option<String>,
    /// First text fragment matching the date heuristic, trimmed.
    pub event_date: Option<String>,
    /// Input URL, echoed verbatim.
    pub url: String,
}

/// Scrape a single event page end to end.
///
/// Session acquisition failure is fatal ([`ScrapeError::Session`]);
/// everything after it is a per-URL failure. The session is torn down
/// whatever the outcome.
pub async fn extract(url: &str, config: &ScrapeConfig) -> Result<ScrapeResult, ScrapeError> {
    let driver = Driver::new(config).await.map_err(ScrapeError::Session)?;
    scrape_page(driver.into_page(), url, config.page_load_timeout()).await
}

/// Run the routine on an already-acquired session, then release it.
///
/// A teardown failure is logged and swallowed so it can never mask the
/// outcome the routine already decided on.
pub async fn scrape_page<S: PageSession>(
    session: S,
    url: &str,
    timeout: Duration,
) -> Result<ScrapeResult, ScrapeError> {
    let outcome = run_extraction(&session, url, timeout).await;
    if let Err(err) = session.close().await {
        debug!(error = ?err, "webdriver session teardown failed");
    }
    outcome
}

/// The linear extraction sequence: navigate, wait for the body, take the
/// title (required), then the image and date (best-effort).
pub async fn run_extraction<S: PageSession>(
    session: &S,
    url: &str,
    timeout: Duration,
) -> Result<ScrapeResult, ScrapeError> {
    session.navigate(url).await?;

    session.wait_for_body(timeout).await.map_err(|err| {
        if is_wait_timeout(&err) {
            ScrapeError::LoadTimeout
        } else {
            ScrapeError::Driver(err)
        }
    })?;

    let raw_title = session.title().await?;
    let title = raw_title.trim();
    if title.is_empty() {
        return Err(ScrapeError::MissingTitle);
    }

    let image_url = locate_image(session).await;
    let event_date = locate_date(session).await;
    let event_name = clean_event_name(title);
    info!(
        %url,
        event = %event_name,
        has_image = image_url.is_some(),
        has_date = event_date.is_some(),
        "event page scraped"
    );

    Ok(ScrapeResult {
        event_name,
        image_url,
        event_date,
        url: url.to_string(),
    })
}

/// Ordered image lookup. Each strategy yields an optional URL; the first
/// non-empty one wins and a failing strategy just falls through to the next.
async fn locate_image<S: PageSession>(session: &S) -> Option<String> {
    match session.first_attr(SOCIAL_PREVIEW_META, "content").await {
        Ok(Some(content)) if !content.is_empty() => Some(content),
        _ => session
            .first_attr(INLINE_IMAGE_FALLBACK, "src")
            .await
            .ok()
            .flatten()
            .filter(|src| !src.is_empty()),
    }
}

/// Best-effort date lookup; any query failure degrades to `None`.
async fn locate_date<S: PageSession>(session: &S) -> Option<String> {
    let text = session
        .first_text(&date_marker_xpath())
        .await
        .ok()
        .flatten()?;
    Some(text.trim().to_string())
}

/// XPath matching any element whose text carries one of the known
/// time-of-day fragments.
fn date_marker_xpath() -> String {
    let clauses: Vec<String> = DATE_TIME_MARKERS
        .iter()
        .map(|marker| format!("contains(text(), '{marker}')"))
        .collect();
    format!("//*[{}]", clauses.join(" or "))
}

/// Strip ticket-vendor boilerplate from a raw page title.
///
/// Removes every occurrence of the vendor word, not only a leading one,
/// then trims. Empty input stays empty; this never fails.
pub fn clean_event_name(raw: &str) -> String {
    raw.replace(TICKET_VENDOR_PREFIX, "").trim().to_string()
}

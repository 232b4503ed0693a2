use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use marquee_browser::Page;

/// What the extraction routine needs from a live page.
///
/// `marquee-browser` provides the real WebDriver-backed implementation;
/// tests drive the routine with scripted fakes instead of a browser.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Load the target URL.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Block until the page body exists, bounded by `timeout`.
    async fn wait_for_body(&self, timeout: Duration) -> Result<()>;

    /// Page title, untrimmed.
    async fn title(&self) -> Result<String>;

    /// Attribute of the first CSS match, if any.
    async fn first_attr(&self, selector: &str, attribute: &str) -> Result<Option<String>>;

    /// Text of the first XPath match, if any.
    async fn first_text(&self, xpath: &str) -> Result<Option<String>>;

    /// End the browser session.
    async fn close(&self) -> Result<()>;
}

#[async_trait]
impl PageSession for Page {
    async fn navigate(&self, url: &str) -> Result<()> {
        Page::navigate(self, url).await
    }

    async fn wait_for_body(&self, timeout: Duration) -> Result<()> {
        Page::wait_for_body(self, timeout).await
    }

    async fn title(&self) -> Result<String> {
        Page::title(self).await
    }

    async fn first_attr(&self, selector: &str, attribute: &str) -> Result<Option<String>> {
        Page::first_attr(self, selector, attribute).await
    }

    async fn first_text(&self, xpath: &str) -> Result<Option<String>> {
        Page::first_text(self, xpath).await
    }

    async fn close(&self) -> Result<()> {
        Page::close(self).await
    }
}

use std::time::Duration;

use anyhow::Result;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};

/// True when `err` is the bounded-wait timeout from [`Page::wait_for_body`].
pub fn is_wait_timeout(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<CmdError>(), Some(CmdError::WaitTimeout))
}

/// DOM query surface for one WebDriver session.
///
/// Only [`Page::wait_for_body`] is bounded; every other query is a single
/// round-trip with no explicit timeout of its own.
pub struct Page {
    client: Client,
}

impl Page {
    /// Wrap an already-connected WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load `url` in the session.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(anyhow::Error::from)
    }

    /// Block until the root content element is present, at most `timeout`.
    pub async fn wait_for_body(&self, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css("body"))
            .await?;
        Ok(())
    }

    /// Page title, untrimmed.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Attribute of the first element matching a CSS selector, in document
    /// order. `None` when nothing matches or the attribute is absent.
    pub async fn first_attr(&self, selector: &str, attribute: &str) -> Result<Option<String>> {
        let mut elements = self.client.find_all(Locator::Css(selector)).await?;
        if elements.is_empty() {
            return Ok(None);
        }
        PageElement::new(elements.remove(0)).attr(attribute).await
    }

    /// Text of the first element matching an XPath expression, in document
    /// order. `None` when nothing matches.
    pub async fn first_text(&self, xpath: &str) -> Result<Option<String>> {
        let mut elements = self.client.find_all(Locator::XPath(xpath)).await?;
        if elements.is_empty() {
            return Ok(None);
        }
        let text = PageElement::new(elements.remove(0)).text().await?;
        Ok(Some(text))
    }

    /// End the browser session. Callers decide whether a failure here
    /// matters; this method itself swallows nothing.
    pub async fn close(&self) -> Result<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(anyhow::Error::from)
    }
}

/// Wrapper for a located DOM element.
pub struct PageElement {
    element: Element,
}

impl PageElement {
    /// Wrap a raw element handle.
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Attribute value, `None` when the attribute is absent.
    pub async fn attr(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Visible text content.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn wait_timeout_is_recognised_through_the_chain() {
        let err = anyhow::Error::from(CmdError::WaitTimeout);
        assert!(is_wait_timeout(&err));
    }

    #[test]
    fn other_errors_are_not_mistaken_for_timeouts() {
        assert!(!is_wait_timeout(&anyhow!("connection reset")));
    }
}

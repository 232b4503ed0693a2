//! Common types shared across the marquee workspace.
//!
//! This crate defines the scrape configuration, the shared error type, and
//! the observability helpers used by the binary and by integration tests. It
//! is intentionally lightweight so every crate can depend on it.
//!
//! - [`ScrapeConfig`]: knobs for one browser session
//! - [`ScrapeError`]: the ways a scrape invocation can end badly
//! - [`observability`]: centralised tracing/logging initialisation

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod observability;

/// Default WebDriver endpoint (chromedriver's standard port).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Configuration for a scrape invocation.
///
/// One value of this configures exactly one browser session; nothing here
/// is process-global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// WebDriver endpoint to connect to.
    pub webdriver_url: String,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Fixed viewport, width by height.
    pub viewport: (u32, u32),
    /// Upper bound on the page readiness wait, in seconds.
    pub page_load_timeout_secs: u64,
    /// Accept TLS certificates the browser would otherwise warn about.
    /// Applied per session rather than process-wide.
    pub accept_insecure_certs: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            viewport: (1920, 1080),
            page_load_timeout_secs: 10,
            accept_insecure_certs: true,
        }
    }
}

impl ScrapeConfig {
    /// Readiness-wait bound as a [`Duration`].
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

/// The ways a scrape invocation can fail.
///
/// Session acquisition is the only fatal case; everything after it is
/// reported as a per-URL failure and leaves the exit status alone. Optional
/// field lookups (image, date) never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The WebDriver session could not be started.
    #[error("Failed to start browser session: {0}")]
    Session(#[source] anyhow::Error),

    /// The page body never appeared within the readiness bound.
    #[error("Page load timeout")]
    LoadTimeout,

    /// The page title was empty after trimming.
    #[error("Failed to extract title")]
    MissingTitle,

    /// Navigation or another required driver call failed.
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
}

impl ScrapeError {
    /// True when the failure happened before the target URL was even tried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScrapeError::Session(_))
    }

    /// Full diagnostic chain for the failure record.
    pub fn details(&self) -> String {
        match self {
            ScrapeError::Session(err) | ScrapeError::Driver(err) => format!("{err:?}"),
            other => format!("{other:?}"),
        }
    }
}

/// Convenient alias for results that use [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn default_config_matches_launch_contract() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert!(cfg.headless);
        assert_eq!(cfg.viewport, (1920, 1080));
        assert_eq!(cfg.page_load_timeout(), Duration::from_secs(10));
        assert!(cfg.accept_insecure_certs);
    }

    #[test]
    fn only_session_failures_are_fatal() {
        assert!(ScrapeError::Session(anyhow!("connection refused")).is_fatal());
        assert!(!ScrapeError::LoadTimeout.is_fatal());
        assert!(!ScrapeError::MissingTitle.is_fatal());
        assert!(!ScrapeError::Driver(anyhow!("lost connection")).is_fatal());
    }

    #[test]
    fn timeout_message_names_the_timeout() {
        let msg = ScrapeError::LoadTimeout.to_string();
        assert!(msg.to_lowercase().contains("timeout"), "got: {msg}");
    }

    #[test]
    fn details_carry_the_wrapped_chain() {
        let err = ScrapeError::Session(anyhow!("connection refused").context("chromedriver"));
        let details = err.details();
        assert!(details.contains("chromedriver"));
        assert!(details.contains("connection refused"));
    }
}

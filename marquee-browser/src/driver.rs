use std::collections::HashMap;

use anyhow::Result;
use fantoccini::{Client, ClientBuilder};
use marquee_common::ScrapeConfig;
use serde_json::json;
use tracing::debug;
use webdriver::capabilities::Capabilities;

use crate::page::Page;

/// Chrome command-line arguments for a scrape session.
pub fn build_launch_arguments(config: &ScrapeConfig) -> Vec<String> {
    let (width, height) = config.viewport;
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
        format!("--window-size={width},{height}"),
        "--disable-notifications".to_string(),
        "--disable-extensions".to_string(),
        "--disable-infobars".to_string(),
    ];
    if config.headless {
        args.push("--headless".to_string());
    }
    args
}

/// Capabilities for a new session: the Chrome launch flags plus TLS leniency
/// scoped to this session only.
pub fn build_capabilities(config: &ScrapeConfig) -> Capabilities {
    let mut caps = Capabilities::new();
    let mut chrome_opts = HashMap::new();
    chrome_opts.insert("args".to_string(), json!(build_launch_arguments(config)));
    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps.insert(
        "acceptInsecureCerts".to_string(),
        json!(config.accept_insecure_certs),
    );
    caps
}

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct Driver {
    client: Client,
}

impl Driver {
    /// Start a session against the configured WebDriver endpoint.
    ///
    /// No retry: a failure here means the invocation cannot proceed at all.
    pub async fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = ClientBuilder::native()
            .capabilities(build_capabilities(config))
            .connect(&config.webdriver_url)
            .await?;
        debug!(
            endpoint = %config.webdriver_url,
            headless = config.headless,
            "webdriver session started"
        );
        Ok(Self { client })
    }

    /// Hand the session over as a [`Page`] query surface.
    pub fn into_page(self) -> Page {
        Page::new(self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_arguments_cover_the_session_contract() {
        let args = build_launch_arguments(&ScrapeConfig::default());
        for expected in [
            "--no-sandbox",
            "--disable-gpu",
            "--disable-dev-shm-usage",
            "--window-size=1920,1080",
            "--disable-notifications",
            "--disable-extensions",
            "--disable-infobars",
            "--headless",
        ] {
            assert!(args.iter().any(|a| a == expected), "missing {expected}");
        }
    }

    #[test]
    fn headed_sessions_drop_only_the_headless_flag() {
        let config = ScrapeConfig {
            headless: false,
            ..ScrapeConfig::default()
        };
        let args = build_launch_arguments(&config);
        assert!(!args.iter().any(|a| a == "--headless"));
        assert!(args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn viewport_flows_into_the_window_size_flag() {
        let config = ScrapeConfig {
            viewport: (1280, 720),
            ..ScrapeConfig::default()
        };
        let args = build_launch_arguments(&config);
        assert!(args.iter().any(|a| a == "--window-size=1280,720"));
    }

    #[test]
    fn capabilities_scope_tls_leniency_to_the_session() {
        let caps = build_capabilities(&ScrapeConfig::default());
        assert_eq!(caps.get("acceptInsecureCerts"), Some(&json!(true)));

        let args = caps
            .get("goog:chromeOptions")
            .and_then(|opts| opts.get("args"))
            .and_then(|v| v.as_array())
            .expect("chrome args present");
        assert!(args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn tls_leniency_can_be_switched_off() {
        let config = ScrapeConfig {
            accept_insecure_certs: false,
            ..ScrapeConfig::default()
        };
        let caps = build_capabilities(&config);
        assert_eq!(caps.get("acceptInsecureCerts"), Some(&json!(false)));
    }
}

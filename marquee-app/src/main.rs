use std::process::ExitCode;

use clap::Parser;
use marquee_common::observability::{init_logging, LogConfig};
use marquee_common::{ScrapeConfig, DEFAULT_WEBDRIVER_URL};
use marquee_scrape::{extract, report};
use tracing::warn;

/// Extract event metadata (name, image, date) from a single web page.
///
/// Emits one JSON record per invocation: the result on stdout, or a failure
/// record on stderr. Requires a reachable WebDriver endpoint.
#[derive(Debug, Parser)]
#[command(name = "marquee", version)]
struct Cli {
    /// Event page URL to scrape.
    url: String,

    /// WebDriver endpoint to drive the browser through.
    #[arg(long, env = "MARQUEE_WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Bound on the page readiness wait, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Run the browser with a visible window.
    #[arg(long)]
    no_headless: bool,

    /// Mirror log events to stderr in addition to the log file.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(LogConfig {
        emit_stderr: cli.verbose,
        ..LogConfig::default()
    }) {
        eprintln!("warning: logging unavailable: {err:#}");
    }

    let config = ScrapeConfig {
        webdriver_url: cli.webdriver_url,
        headless: !cli.no_headless,
        page_load_timeout_secs: cli.timeout_secs,
        ..ScrapeConfig::default()
    };

    match extract(&cli.url, &config).await {
        Ok(result) => {
            if let Err(err) = report::write_success(std::io::stdout().lock(), &result) {
                eprintln!("warning: could not write result record: {err:#}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(scrape_err) => {
            warn!(url = %cli.url, error = %scrape_err, "scrape failed");
            if let Err(err) = report::write_failure(std::io::stderr().lock(), &scrape_err, &cli.url)
            {
                eprintln!("warning: could not write failure record: {err:#}");
            }
            if scrape_err.is_fatal() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

//! Serialization boundary for the invocation's result records.
//!
//! Exactly one record per invocation: success to stdout, failure to stderr.
//! Records are built only here; the rest of the crate works with
//! [`ScrapeResult`] and [`ScrapeError`] directly.

use std::io::Write;

use anyhow::{Context, Result};
use marquee_common::ScrapeError;
use serde::Serialize;

use crate::extract::ScrapeResult;

#[derive(Serialize)]
struct FailureRecord<'a> {
    error: String,
    details: String,
    url: &'a str,
}

/// Write the success record, newline-terminated.
pub fn write_success<W: Write>(mut out: W, result: &ScrapeResult) -> Result<()> {
    serde_json::to_writer(&mut out, result).context("failed to serialize scrape result")?;
    writeln!(out)?;
    Ok(())
}

/// Write the failure record, newline-terminated.
pub fn write_failure<W: Write>(mut out: W, error: &ScrapeError, url: &str) -> Result<()> {
    let record = FailureRecord {
        error: error.to_string(),
        details: error.details(),
        url,
    };
    serde_json::to_writer(&mut out, &record).context("failed to serialize scrape failure")?;
    writeln!(out)?;
    Ok(())
}

//! Remote system-prompt retrieval.
//!
//! The system prompt can be resolved at session start from a URL. Unlike
//! provider calls, a fetch failure here is fatal for the session: the user
//! asked for a specific system prompt and silently proceeding without it
//! would change the analysis contract.

use anyhow::{bail, Context, Result};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the system prompt text from `url`. Any non-200 response is an
/// error.
pub fn fetch_system_prompt(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch system prompt from {url}"))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        bail!("system prompt fetch returned {status} for {url}");
    }

    response.text().context("system prompt response was not readable text")
}

//! Page fetching with failures carried as values.
//!
//! The fetcher performs a single HTTP GET per call with the client defaults
//! (no retry, no explicit timeout, default redirect policy). Failures are
//! returned as [`FetchError`] values whose display strings double as
//! placeholder article content downstream, so a dead link never aborts a
//! scrape.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

/// A failed page fetch.
///
/// The display string is what callers store in place of content, so it is
/// phrased for end users and always names the cause (the status code for
/// HTTP failures).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to retrieve content. Status code: {0}")]
    BadStatus(StatusCode),
    #[error("Error retrieving content: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetch the raw HTML body of a URL with a single GET.
///
/// Any non-200 status is a [`FetchError::BadStatus`]; connection, TLS, and
/// body-read failures are [`FetchError::Transport`].
#[instrument(level = "debug")]
pub async fn fetch_page(url: &str) -> Result<String, FetchError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::BadStatus(status));
    }
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}

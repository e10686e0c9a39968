//! Remote fetch client for web uploads.

use std::time::Duration;

use reqwest::Client;

use crate::config::HttpConfig;
use crate::{AtticError, Result};

/// User agent string for remote fetches.
const USER_AGENT: &str = "attic/0.1 (asset fetch)";

/// HTTP client for fetching remote files into storage.
///
/// Timeouts and the redirect limit come from [`HttpConfig`]; a hanging
/// remote server is bounded by the total request timeout.
pub struct WebFetcher {
    client: Client,
    max_size: u64,
}

impl WebFetcher {
    /// Create a fetcher from the given configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AtticError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_size: config.max_download_size_bytes,
        })
    }

    /// Fetch the body of a single GET request.
    ///
    /// A non-success status, transport error or oversized body is
    /// returned as an error; there are no retries.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AtticError::Http(format!("failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(AtticError::Http(format!(
                "unexpected status {} for {url}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size {
                return Err(AtticError::Http(format!(
                    "remote file too large: {content_length} bytes (max {} bytes)",
                    self.max_size
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AtticError::Http(format!("failed to read response: {e}")))?;

        if bytes.len() as u64 > self.max_size {
            return Err(AtticError::Http(format!(
                "remote file too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_size
            )));
        }

        Ok(bytes.to_vec())
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        Self::new(&HttpConfig::default()).expect("failed to create default WebFetcher")
    }
}

/// Validate that a URL is an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| AtticError::Validation(format!("invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AtticError::Validation(format!(
            "unsupported URL scheme: {scheme}"
        ))),
    }
}

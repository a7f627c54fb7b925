//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent string
//! - Sleeping a random interval before every request to stay polite
//! - Classifying failures into `FetchError`
//!
//! There is no retry logic here. A failed URL is dropped for the rest of the
//! crawl attempt.

use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("wiki-ripple/", env!("CARGO_PKG_VERSION"));

/// Shortest pause before a request
pub const MIN_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Longest pause before a request
pub const MAX_REQUEST_DELAY: Duration = Duration::from_secs(3);

/// Why a URL could not be downloaded
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Empty response body from {url}")]
    EmptyBody { url: String },
}

/// Builds an HTTP client with proper configuration
///
/// Only the connection phase has a timeout. A server that accepts the
/// connection and then stalls will stall the crawl that is waiting on it.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited page downloader
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    min_delay: Duration,
    max_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher with its own client and the standard request delay
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client()?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            min_delay: MIN_REQUEST_DELAY,
            max_delay: MAX_REQUEST_DELAY,
        }
    }

    /// Overrides the pause taken before each request
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn with_delay(mut self, min_delay: Duration, max_delay: Duration) -> Self {
        self.min_delay = min_delay.min(max_delay);
        self.max_delay = min_delay.max(max_delay);
        self
    }

    /// Picks the pause before the next request
    fn next_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }

        rand::thread_rng().gen_range(self.min_delay..=self.max_delay)
    }

    /// Fetches a URL and returns its body as text
    ///
    /// # Request Flow
    ///
    /// 1. Sleep a random delay between the configured bounds
    /// 2. Send a GET request (redirects are followed by the client)
    /// 3. Reject any non-2xx status
    /// 4. Read the body; an empty body counts as a failure
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page body
    /// * `Err(FetchError)` - The page could not be downloaded
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tokio::time::sleep(self.next_delay()).await;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients from the `[http]` configuration
//! - A single GET per page (redirects follow the client policy, no retry)
//! - Status and Content-Type validation

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// Source of page bodies for the crawl
///
/// The coordinator only ever talks to the network through this trait, which
/// lets tests swap in an in-memory site.
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its HTML body
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        fetch_url(&self.client, url)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_tally::config::HttpConfig;
/// use site_tally::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and validates the response
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport failure (DNS, connect, timeout, redirect limit) | `FetchError::Network` |
/// | Status outside 200..=299 | `FetchError::HttpStatus` |
/// | `Content-Type` missing or not containing `text/html` | `FetchError::UnsupportedContentType` |
/// | Body cannot be read | `FetchError::Network` |
///
/// Exactly one attempt is made.
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(FetchError::UnsupportedContentType {
            url: url.to_string(),
            content_type,
        });
    }

    response.text().await.map_err(|source| FetchError::Network {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_fetcher_without_redirects() {
        let config = HttpConfig {
            max_redirects: 0,
            ..HttpConfig::default()
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }

    // Status, Content-Type and transport failures are covered with wiremock
    // in the integration tests.
}

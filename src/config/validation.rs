use crate::config::types::{Config, CrawlConfig, HttpConfig};
use crate::url::with_default_scheme;
use crate::ConfigError;
use tokio::sync::Semaphore;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawl bounds and the seed URL
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be >= 1, got {}",
            config.max_concurrency
        )));
    }

    if config.max_concurrency > Semaphore::MAX_PERMITS {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be <= {}, got {}",
            Semaphore::MAX_PERMITS,
            config.max_concurrency
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    validate_base_url(&config.base_url)
}

/// The seed must be an absolute http(s) URL with a host, otherwise the crawl
/// could never leave the root task. A scheme-relative seed is read as http.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(&with_default_scheme(base_url))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must use http or https, got {}",
            base_url,
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' has no host",
            base_url
        )));
    }

    Ok(())
}

/// Validates HTTP client settings
pub(crate) fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

//! Site-Tally: a same-host link census
//!
//! This crate crawls every page reachable from a seed URL on the same host,
//! bounding both the total number of pages and the number of fetches in flight,
//! and counts how many times each canonical URL was linked.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for Site-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure of a single page fetch
///
/// All variants are terminal for the page that produced them and are never
/// propagated past the task that fetched it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Unsupported content type {content_type:?} for {url}")]
    UnsupportedContentType { url: String, content_type: String },
}

impl FetchError {
    /// Short stable label used when aggregating failures
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::UnsupportedContentType { .. } => "unsupported_content_type",
        }
    }
}

/// Degraded (but not empty) link extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Base URL is not valid: {0}")]
    InvalidBase(String),

    #[error("{0} link(s) could not be parsed")]
    InvalidLinks(usize),
}

/// Result type alias for Site-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlSummary};
pub use state::{SkipReason, TaskOutcome};
pub use crate::url::{normalize_url, same_domain};

use serde::Deserialize;

/// Main configuration structure for Site-Tally
///
/// Immutable for the lifetime of a crawl.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Builds a configuration with default HTTP settings
    pub fn new(base_url: impl Into<String>, max_concurrency: usize, max_pages: usize) -> Self {
        Self {
            crawl: CrawlConfig {
                base_url: base_url.into(),
                max_concurrency,
                max_pages,
            },
            http: HttpConfig::default(),
        }
    }
}

/// Crawl bounds
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed URL; also the base every extracted link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of tasks fetching and expanding at once
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of distinct pages registered
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("site-tally/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

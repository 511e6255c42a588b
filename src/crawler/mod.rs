//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with status and content-type validation
//! - HTML parsing and link extraction
//! - The visited registry and concurrency scheduling
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod registry;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlSummary};
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use parser::{collect_hrefs, extract_links, resolve_links, ExtractedLinks};
pub use registry::{PageCount, Registry};
pub use scheduler::{Scheduler, TaskGuard};

use crate::config::Config;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Crawl from the seed URL until no work remains
/// 4. Return the sorted visit counts and crawl statistics
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl ran to completion (page failures included)
/// * `Err(TallyError)` - Configuration or HTTP client setup failed
pub async fn crawl(config: Config) -> crate::Result<CrawlSummary> {
    run_crawl(config).await
}

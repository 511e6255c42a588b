//! Output module for crawl reports
//!
//! This module handles:
//! - The sorted `count  url` report printed after a crawl
//! - Crawl statistics derived from per-task outcomes

mod report;
pub mod stats;

pub use report::{format_report, print_report};
pub use stats::{format_statistics, print_failures, print_statistics, CrawlStatistics, PageFailure};

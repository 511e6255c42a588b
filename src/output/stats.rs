//! Crawl statistics
//!
//! Every task ends with a `TaskOutcome`; this module folds those outcomes into
//! counters the CLI can choose to display.

use crate::state::{SkipReason, TaskOutcome};
use std::collections::BTreeMap;
use std::time::Duration;

/// A page that was registered but could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// The raw URL the fetch was attempted with
    pub url: String,

    /// Stable failure label (`network`, `http_status`, `unsupported_content_type`)
    pub kind: &'static str,

    /// Human-readable error
    pub message: String,
}

/// Aggregated task outcomes for one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Tasks that created a registry entry
    pub pages_registered: usize,

    /// Pages whose body was fetched and expanded
    pub pages_fetched: usize,

    /// Child tasks spawned across all pages
    pub links_found: usize,

    /// Pages where some links had to be dropped
    pub degraded_pages: usize,

    /// Tasks that stopped before fetching, by reason
    pub skips: BTreeMap<SkipReason, usize>,

    /// Fetch failures, in completion order
    pub failures: Vec<PageFailure>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Folds one task outcome into the counters
    pub fn record(&mut self, url: &str, outcome: &TaskOutcome) {
        if outcome.is_first_visit() {
            self.pages_registered += 1;
        }
        if outcome.is_fetched() {
            self.pages_fetched += 1;
        }
        self.links_found += outcome.links_found();

        match outcome {
            TaskOutcome::Skipped(reason) => {
                *self.skips.entry(*reason).or_insert(0) += 1;
            }
            TaskOutcome::Expanded {
                link_error: Some(_),
                ..
            } => {
                self.degraded_pages += 1;
            }
            TaskOutcome::Expanded { .. } => {}
            TaskOutcome::FetchFailed(e) => {
                self.failures.push(PageFailure {
                    url: url.to_string(),
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Number of tasks skipped for `reason`
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skips.get(&reason).copied().unwrap_or(0)
    }

    /// Total number of tasks that ran
    pub fn total_tasks(&self) -> usize {
        self.pages_registered + self.skips.values().sum::<usize>()
    }

    /// Fetch failures grouped by kind
    pub fn failures_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Formats statistics as plain text
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut lines = vec![
        "=== Crawl Statistics ===".to_string(),
        String::new(),
        "Overview:".to_string(),
        format!("  Tasks run: {}", stats.total_tasks()),
        format!("  Pages registered: {}", stats.pages_registered),
        format!("  Pages fetched: {}", stats.pages_fetched),
        format!("  Links found: {}", stats.links_found),
        format!("  Pages with invalid links: {}", stats.degraded_pages),
        format!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64()),
    ];

    if !stats.skips.is_empty() {
        lines.push(String::new());
        lines.push("Skipped Tasks:".to_string());
        for (reason, count) in &stats.skips {
            lines.push(format!("  {}: {}", reason, count));
        }
    }

    if !stats.failures.is_empty() {
        lines.push(String::new());
        lines.push("Fetch Failures:".to_string());
        let mut by_kind: Vec<_> = stats.failures_by_kind().into_iter().collect();
        by_kind.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (kind, count) in by_kind {
            lines.push(format!("  {}: {}", kind, count));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}

/// Prints every fetch failure, one per line, to stdout
pub fn print_failures(stats: &CrawlStatistics) {
    if stats.failures.is_empty() {
        return;
    }

    println!("\nFailed pages ({}):", stats.failures.len());
    for failure in &stats.failures {
        println!("  [{}] {}", failure.kind, failure.message);
    }
}

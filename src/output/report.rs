//! Plain-text visit report
//!
//! One line per registry entry, `count  url`, sorted by descending count then
//! ascending URL, under a header naming the seed URL.

use crate::crawler::{CrawlSummary, PageCount};

const RULE: &str = "=============================";

/// Formats the report for a finished crawl
pub fn format_report(summary: &CrawlSummary) -> String {
    let mut out = format!("{RULE}\nREPORT for {}\n{RULE}\n\n", summary.base_url);
    for page in &summary.pages {
        out.push_str(&format_row(page));
        out.push('\n');
    }
    out
}

fn format_row(page: &PageCount) -> String {
    format!("{}  {}", page.count, page.url)
}

/// Prints the report to stdout
pub fn print_report(summary: &CrawlSummary) {
    print!("{}", format_report(summary));
}

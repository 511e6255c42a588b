/// Task outcome definitions for tracking crawl progress
///
/// Every crawl task ends in exactly one of these outcomes. None of them is
/// retried, and none of them is propagated to sibling tasks.
use crate::{FetchError, LinkError};
use std::fmt;

/// Why a task stopped before fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// The registry already holds `max_pages` distinct keys
    AtCapacity,

    /// The URL is on another host (or has no host at all)
    OutOfScope,

    /// Another task already registered this canonical URL
    AlreadyVisited,
}

impl SkipReason {
    /// Short stable label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtCapacity => "at_capacity",
            Self::OutOfScope => "out_of_scope",
            Self::AlreadyVisited => "already_visited",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one crawl task
#[derive(Debug)]
pub enum TaskOutcome {
    /// Stopped before fetching; the page contributed no children
    Skipped(SkipReason),

    /// Fetched and expanded; `links_found` child tasks were spawned
    Expanded {
        links_found: usize,
        link_error: Option<LinkError>,
    },

    /// Registered as visited but the fetch failed, so the subtree is unexplored
    FetchFailed(FetchError),
}

impl TaskOutcome {
    /// Returns true if the page body was fetched
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Expanded { .. })
    }

    /// Returns true if the task registered a new page (fetched or not)
    pub fn is_first_visit(&self) -> bool {
        matches!(self, Self::Expanded { .. } | Self::FetchFailed(_))
    }

    /// Number of child tasks this outcome produced
    pub fn links_found(&self) -> usize {
        match self {
            Self::Expanded { links_found, .. } => *links_found,
            _ => 0,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
            Self::Expanded {
                links_found,
                link_error: None,
            } => write!(f, "expanded ({} links)", links_found),
            Self::Expanded {
                links_found,
                link_error: Some(e),
            } => write!(f, "expanded ({} links, degraded: {})", links_found, e),
            Self::FetchFailed(e) => write!(f, "fetch failed ({})", e),
        }
    }
}

//! URL handling module for Site-Tally
//!
//! This module provides the two pure functions the crawl is keyed on:
//! canonicalizing a URL into a registry key, and deciding whether two URLs
//! live on the same host.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::{normalize_url, with_default_scheme};

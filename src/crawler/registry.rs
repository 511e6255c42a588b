//! Visited registry shared by every task of one crawl
//!
//! The registry maps a normalized URL to the number of times it was observed.
//! All access goes through one coarse mutex; each public method holds it for
//! exactly one logical operation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCount {
    /// Normalized URL
    pub url: String,

    /// Number of times the URL was observed (≥ 1)
    pub count: usize,
}

/// Synchronized normalized-URL → visit-count store
#[derive(Debug)]
pub struct Registry {
    pages: Mutex<HashMap<String, usize>>,
    max_pages: usize,
}

impl Registry {
    /// Creates an empty registry capped at `max_pages` distinct keys
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            max_pages,
        }
    }

    /// Returns true once the number of distinct keys has reached the cap
    pub fn at_capacity(&self) -> bool {
        self.lock().len() >= self.max_pages
    }

    /// Records an observation of `key`
    ///
    /// Returns true if this call created the entry (the caller is the first
    /// visitor and owns the fetch), false if it only incremented the count.
    /// The lookup and the insert happen under the same lock acquisition.
    pub fn add_or_increment(&self, key: &str) -> bool {
        let mut pages = self.lock();
        match pages.get_mut(key) {
            Some(count) => {
                *count += 1;
                false
            }
            None => {
                pages.insert(key.to_string(), 1);
                true
            }
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Visit count for `key`, if registered
    pub fn count(&self, key: &str) -> Option<usize> {
        self.lock().get(key).copied()
    }

    /// Copies the entries out, sorted by descending count then ascending URL
    pub fn snapshot(&self) -> Vec<PageCount> {
        let mut entries: Vec<PageCount> = self
            .lock()
            .iter()
            .map(|(url, count)| PageCount {
                url: url.clone(),
                count: *count,
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));
        entries
    }

    // A panicking task cannot leave the map half-updated, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

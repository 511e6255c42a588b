//! State module for tracking crawl progress
//!
//! A crawl task moves `Pending → capacity check → scope check → normalize →
//! dedup → {Skip | Fetch → Expand → SpawnChildren} → Done` and never moves
//! backward. This module names where each task ended up.

mod task_state;

// Re-export main types
pub use task_state::{SkipReason, TaskOutcome};

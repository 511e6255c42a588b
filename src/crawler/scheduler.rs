//! Scheduler for bounding active work and detecting completion
//!
//! This module handles:
//! - Global concurrency limiting via a counting semaphore
//! - Tracking outstanding (spawned but not finished) tasks
//! - Letting the crawl initiator block until no work remains
//!
//! Spawning is not throttled: a page with many links creates all of its
//! child tasks at once, and they queue on slot acquisition.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, OwnedSemaphorePermit, Semaphore};

/// Concurrency slots plus the outstanding-task counter of one crawl
#[derive(Debug)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrently active tasks
    slots: Arc<Semaphore>,

    /// Outstanding task count, shared with every `TaskGuard`
    outstanding: Arc<Outstanding>,
}

#[derive(Debug, Default)]
struct Outstanding {
    count: AtomicUsize,
    idle: Notify,
}

/// Marks one outstanding task; completion is recorded when it is dropped
#[derive(Debug)]
pub struct TaskGuard {
    outstanding: Arc<Outstanding>,
}

impl Scheduler {
    /// Creates a scheduler allowing `max_concurrency` active tasks
    ///
    /// The count is capped at `Semaphore::MAX_PERMITS`.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max_concurrency.min(Semaphore::MAX_PERMITS))),
            outstanding: Arc::new(Outstanding::default()),
        }
    }

    /// Waits for a concurrency slot
    ///
    /// The slot is released when the returned permit is dropped. Returns
    /// `None` only if the semaphore was closed, which this crate never does.
    pub async fn acquire_slot(&self) -> Option<OwnedSemaphorePermit> {
        Arc::clone(&self.slots).acquire_owned().await.ok()
    }

    /// Registers one unit of outstanding work
    ///
    /// Must be called before the task is spawned so the count can never
    /// reach zero while a child is still being handed off.
    pub fn track(&self) -> TaskGuard {
        self.outstanding.count.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Number of spawned tasks that have not finished
    pub fn outstanding(&self) -> usize {
        self.outstanding.count.load(Ordering::SeqCst)
    }

    /// Number of free concurrency slots
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Blocks until the outstanding count returns to zero
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.outstanding.idle.notified();
            tokio::pin!(notified);
            // Register interest before reading the count so a wakeup between
            // the load and the await is not lost.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.outstanding.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.outstanding.idle.notify_waiters();
        }
    }
}

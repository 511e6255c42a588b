//! Crawler coordinator - main crawl orchestration logic
//!
//! Every discovered URL becomes its own tokio task. A task:
//! 1. Waits for one of `max_concurrency` slots
//! 2. Skips if the registry is at capacity
//! 3. Skips if the URL is on another host
//! 4. Normalizes the URL
//! 5. Skips if another task already registered the key
//! 6. Fetches the page; a failure ends the task
//! 7. Extracts links, resolved against the seed URL
//! 8. Spawns one child task per link
//! 9. Releases its slot, then records completion
//!
//! The crawl ends when the outstanding-task count returns to zero.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::registry::{PageCount, Registry};
use crate::crawler::scheduler::Scheduler;
use crate::output::CrawlStatistics;
use crate::state::{SkipReason, TaskOutcome};
use crate::url::{normalize_url, same_domain, with_default_scheme};
use crate::{ConfigError, TallyError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// How often (in fetched pages) progress is logged
const PROGRESS_EVERY: usize = 10;

/// Final state of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// The seed URL, with a scheme-relative seed read as http
    pub base_url: String,

    /// Registry contents, sorted by descending count then ascending URL
    pub pages: Vec<PageCount>,

    /// Per-task outcome aggregates
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// Owns everything shared by the tasks of one crawl: the immutable
/// configuration, the fetcher, the visited registry and the scheduler.
pub struct Coordinator<F = HttpFetcher> {
    config: Config,
    fetcher: F,
    registry: Registry,
    scheduler: Scheduler,
    stats: Mutex<CrawlStatistics>,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration valid and HTTP client built
    /// * `Err(TallyError)` - Invalid configuration or client construction failure
    pub fn new(config: Config) -> Result<Self, TallyError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, fetcher)?)
    }
}

impl<F> Coordinator<F>
where
    F: PageFetcher + 'static,
{
    /// Creates a coordinator around any page source
    pub fn with_fetcher(mut config: Config, fetcher: F) -> Result<Self, ConfigError> {
        config.crawl.base_url = with_default_scheme(&config.crawl.base_url).into_owned();
        validate(&config)?;

        let registry = Registry::new(config.crawl.max_pages);
        let scheduler = Scheduler::new(config.crawl.max_concurrency);

        Ok(Self {
            config,
            fetcher,
            registry,
            scheduler,
            stats: Mutex::new(CrawlStatistics::default()),
        })
    }

    /// Runs the crawl to exhaustion
    ///
    /// Seeds one root task with the base URL and returns once every spawned
    /// task has finished. Individual page failures never fail the crawl.
    pub async fn run(self) -> CrawlSummary {
        let start_time = Instant::now();
        let coordinator = Arc::new(self);
        let base_url = coordinator.config.crawl.base_url.clone();

        tracing::info!(
            "Starting crawl of {} (max concurrency {}, max pages {})",
            base_url,
            coordinator.config.crawl.max_concurrency,
            coordinator.config.crawl.max_pages
        );

        Self::spawn_task(&coordinator, base_url.clone());
        coordinator.scheduler.wait_idle().await;

        let elapsed = start_time.elapsed();
        let summary = coordinator.summarize(base_url, elapsed);

        tracing::info!(
            "Crawl completed: {} pages registered, {} fetched in {:?}",
            summary.pages.len(),
            summary.stats.pages_fetched,
            elapsed
        );

        summary
    }

    /// Registers a task as outstanding and spawns it
    fn spawn_task(this: &Arc<Self>, url: String) {
        let guard = this.scheduler.track();
        let coordinator = Arc::clone(this);

        tokio::spawn(async move {
            let outcome = coordinator.process(&url).await;
            coordinator.record(&url, &outcome);
            // Completion is marked only after the slot was released in `process`
            drop(guard);
        });
    }

    /// Processes a single URL through the task state machine
    async fn process(self: &Arc<Self>, url: &str) -> TaskOutcome {
        let Some(_slot) = self.scheduler.acquire_slot().await else {
            // A closed semaphore can never hand out capacity again
            return TaskOutcome::Skipped(SkipReason::AtCapacity);
        };

        if self.registry.at_capacity() {
            tracing::debug!("Page cap reached, skipping {}", url);
            return TaskOutcome::Skipped(SkipReason::AtCapacity);
        }

        if !same_domain(&self.config.crawl.base_url, url) {
            tracing::debug!("Out of scope: {}", url);
            return TaskOutcome::Skipped(SkipReason::OutOfScope);
        }

        let key = normalize_url(url);
        if !self.registry.add_or_increment(&key) {
            tracing::debug!("Already visited {}", key);
            return TaskOutcome::Skipped(SkipReason::AlreadyVisited);
        }

        tracing::debug!("Fetching {}", url);
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch failed: {}", e);
                return TaskOutcome::FetchFailed(e);
            }
        };

        let extracted = extract_links(&body, &self.config.crawl.base_url);
        if let Some(e) = &extracted.error {
            tracing::warn!("Degraded link extraction on {}: {}", url, e);
        }

        let links_found = extracted.links.len();
        tracing::debug!("Found {} links on {}", links_found, url);

        for link in extracted.links {
            Self::spawn_task(self, link);
        }

        TaskOutcome::Expanded {
            links_found,
            link_error: extracted.error,
        }
    }

    /// Folds one task outcome into the crawl statistics
    fn record(&self, url: &str, outcome: &TaskOutcome) {
        tracing::trace!("{}: {}", url, outcome);

        let fetched = {
            let mut stats = self.lock_stats();
            stats.record(url, outcome);
            stats.pages_fetched
        };

        if outcome.is_fetched() && fetched % PROGRESS_EVERY == 0 {
            tracing::info!(
                "Progress: {} pages fetched, {} pages registered, {} tasks outstanding, {} slots free",
                fetched,
                self.registry.len(),
                self.scheduler.outstanding(),
                self.scheduler.available_slots()
            );
        }
    }

    fn summarize(&self, base_url: String, elapsed: Duration) -> CrawlSummary {
        let mut stats = self.lock_stats().clone();
        stats.elapsed = elapsed;

        CrawlSummary {
            base_url,
            pages: self.registry.snapshot(),
            stats,
        }
    }

    fn lock_stats(&self) -> MutexGuard<'_, CrawlStatistics> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use site_tally::config::Config;
/// use site_tally::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::new("https://example.com/", 4, 100)).await?;
/// for page in &summary.pages {
///     println!("{}  {}", page.count, page.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, TallyError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

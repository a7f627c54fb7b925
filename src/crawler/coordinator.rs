//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop for a single instance and the entry
//! point that runs several instances side by side. Within one instance every
//! step is sequential: dequeue, fetch, extract, store, enqueue, checkpoint.
//! Instances share nothing but the cancellation token.

use crate::config::CrawlConfig;
use crate::crawler::extractor::extract_html;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::state::{CrawlState, CrawlStatus};
use crate::storage::{JsonStorage, PageRecord, Storage};
use crate::CrawlError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use url::Url;

/// Number of stored pages between periodic checkpoints
pub const CHECKPOINT_INTERVAL: u64 = 100;

/// Outcome of one crawl instance
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed URL of the crawl
    pub start_url: String,

    /// Output directory of the crawl
    pub directory: PathBuf,

    /// How the crawl ended
    pub status: CrawlStatus,

    /// Page records written over the crawl's lifetime, earlier runs included
    pub pages_processed: u64,

    /// Page records written by this run alone
    pub pages_stored: u64,

    /// Size of the visited set at the end
    pub visited: usize,

    /// URLs still waiting in the frontier at the end
    pub pending: usize,

    /// When this run started
    pub started_at: DateTime<Utc>,

    /// When this run stopped
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Wall-clock duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Main crawler coordinator structure
///
/// Owns everything one crawl instance touches: its frontier and visited set,
/// its storage directory, and its page budget.
pub struct Coordinator<S: Storage = JsonStorage> {
    config: CrawlConfig,
    fetcher: Fetcher,
    storage: S,
    frontier: Frontier,
    pages_processed: u64,
    pages_stored: u64,
    status: CrawlStatus,
}

impl Coordinator<JsonStorage> {
    /// Creates a coordinator writing into the configured directory
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl instance configuration
    /// * `fetcher` - The fetcher to download pages with
    /// * `fresh` - Whether to discard a previous checkpoint in the directory
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, resumed from any checkpoint found
    /// * `Err(CrawlError)` - The directory or seed URL is unusable
    pub fn new(config: CrawlConfig, fetcher: Fetcher, fresh: bool) -> Result<Self, CrawlError> {
        let storage = JsonStorage::open(&config.directory)?;

        if fresh {
            tracing::info!(
                "Discarding previous progress in {}",
                config.directory.display()
            );
            storage.reset()?;
        }

        Self::from_parts(config, fetcher, storage)
    }
}

impl<S: Storage> Coordinator<S> {
    /// Creates a coordinator from explicit parts
    ///
    /// Progress is loaded from `storage`. The frontier is seeded with the
    /// start URL, followed by whatever was still pending at the last
    /// checkpoint; anything already visited is skipped. Both are queued in
    /// their parsed form so they compare equal to resolved links.
    pub fn from_parts(config: CrawlConfig, fetcher: Fetcher, storage: S) -> Result<Self, CrawlError> {
        let start_url = Url::parse(&config.start_url)?.to_string();

        let state = storage.load_state();
        let mut frontier = Frontier::with_visited(state.visited_urls);
        frontier.enqueue(std::iter::once(start_url));
        frontier.enqueue(state.pending_urls.into_iter().filter_map(|pending| {
            match Url::parse(&pending) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    tracing::warn!("Dropping unparseable pending URL {}: {}", pending, e);
                    None
                }
            }
        }));

        Ok(Self {
            config,
            fetcher,
            storage,
            frontier,
            pages_processed: state.pages_processed,
            pages_stored: 0,
            status: CrawlStatus::Running,
        })
    }

    /// Returns the current lifecycle status
    pub fn status(&self) -> CrawlStatus {
        self.status
    }

    /// Returns the number of page records written over the crawl's lifetime
    pub fn pages_processed(&self) -> u64 {
        self.pages_processed
    }

    /// Returns the frontier
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Snapshots the state a checkpoint would save
    pub fn state(&self) -> CrawlState {
        CrawlState {
            visited_urls: self.frontier.visited().clone(),
            pages_processed: self.pages_processed,
            pending_urls: self.frontier.pending(),
        }
    }

    /// Runs the crawl loop until the crawl finishes or is cancelled
    ///
    /// # Loop
    ///
    /// 1. Stop as `Interrupted` if cancellation was requested
    /// 2. Stop as `Finished` once the page budget is spent
    /// 3. Dequeue a URL; stop as `Finished` if the frontier is empty
    /// 4. Skip it if already visited
    /// 5. Fetch it; on failure drop it without marking it visited
    /// 6. Extract a record; on a miss drop it without marking it visited
    /// 7. Store the record, mark the URL visited, enqueue its links
    /// 8. Checkpoint whenever the page count is a multiple of the interval
    ///
    /// Cancellation is also honoured while a fetch is in flight; that URL goes
    /// back to the head of the queue so the checkpoint keeps it. Either way a final checkpoint is written before returning.
    pub async fn run(&mut self, cancel: &CancellationToken) -> CrawlReport {
        let started_at = Utc::now();
        self.status = CrawlStatus::Running;

        tracing::info!(
            "Starting crawl from {} ({} pages previously processed, {} URLs queued)",
            self.config.start_url,
            self.pages_processed,
            self.frontier.len()
        );

        while self.status == CrawlStatus::Running {
            if cancel.is_cancelled() {
                tracing::info!("Crawling interrupted");
                self.status = CrawlStatus::Interrupted;
                break;
            }

            if self.pages_processed >= self.config.max_pages {
                tracing::info!("Page budget of {} reached", self.config.max_pages);
                self.status = CrawlStatus::Finished;
                break;
            }

            let Some(url) = self.frontier.dequeue() else {
                tracing::info!("Frontier is empty");
                self.status = CrawlStatus::Finished;
                break;
            };

            if self.frontier.is_visited(&url) {
                tracing::trace!("Skipping already visited {}", url);
                continue;
            }

            tracing::info!(
                "Processing {} ({}/{})",
                url,
                self.pages_processed + 1,
                self.config.max_pages
            );

            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                result = self.fetcher.fetch(&url) => Some(result),
            };

            let Some(fetched) = fetched else {
                tracing::info!("Crawling interrupted while fetching {}", url);
                self.frontier.requeue_front(url);
                self.status = CrawlStatus::Interrupted;
                break;
            };

            let body = match fetched {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Error downloading {}", e);
                    continue;
                }
            };

            match extract_html(&body, &url, self.frontier.visited()) {
                Some(record) => self.accept(url, record),
                None => tracing::warn!("No article title found on {}, skipping", url),
            }

            if self.pages_processed % CHECKPOINT_INTERVAL == 0 {
                self.checkpoint();
            }
        }

        self.checkpoint();

        tracing::info!(
            "Crawling {}. Total pages processed: {}",
            self.status,
            self.pages_processed
        );

        CrawlReport {
            start_url: self.config.start_url.clone(),
            directory: self.config.directory.clone(),
            status: self.status,
            pages_processed: self.pages_processed,
            pages_stored: self.pages_stored,
            visited: self.frontier.visited().len(),
            pending: self.frontier.pending().len(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Stores a record and feeds its links back into the frontier
    ///
    /// A failed store is logged and not counted, but the URL is still marked
    /// visited and its links still queued.
    fn accept(&mut self, url: String, record: PageRecord) {
        debug_assert_eq!(record.url, url);

        match self.storage.store_page(&record) {
            Ok(path) => {
                self.pages_processed += 1;
                self.pages_stored += 1;
                tracing::info!(
                    "Stored page {}/{}: {}",
                    self.pages_processed,
                    self.config.max_pages,
                    record.title
                );
                tracing::debug!("Wrote {}", path.display());
            }
            Err(e) => tracing::error!("Error storing content for {}: {}", url, e),
        }

        self.frontier.mark_visited(url);

        let queued = self.frontier.enqueue(record.links);
        tracing::debug!(
            "Queued {} links, frontier size {}",
            queued,
            self.frontier.len()
        );
    }

    /// Saves a checkpoint, logging instead of failing
    fn checkpoint(&mut self) {
        let state = self.state();

        match self.storage.save_checkpoint(&state) {
            Ok(()) => tracing::info!("Progress saved: {} pages", state.pages_processed),
            Err(e) => tracing::error!("Error saving progress: {}", e),
        }
    }
}

/// Runs several crawl instances in parallel
///
/// Each configuration gets its own task, coordinator, and directory. The
/// call returns once every task has stopped; after `cancel` fires that means
/// once every instance has written its final checkpoint.
///
/// # Arguments
///
/// * `configs` - One entry per crawl instance
/// * `fetcher` - Cloned into every instance
/// * `fresh` - Whether to discard previous checkpoints
/// * `cancel` - Cancels every instance when triggered
///
/// # Returns
///
/// Reports in configuration order. Instances that could not start, or whose
/// task panicked, are logged and left out.
///
/// # Example
///
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use wiki_ripple::config::CrawlConfig;
/// use wiki_ripple::crawler::{run_all, Fetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let configs = vec![
///     CrawlConfig::new("https://en.wikipedia.org/wiki/History", "pages/history_wiki", 100),
///     CrawlConfig::new("https://en.wikipedia.org/wiki/Politics", "pages/politics_wiki", 100),
/// ];
/// let reports = run_all(configs, Fetcher::new()?, false, CancellationToken::new()).await;
/// # Ok(())
/// # }
/// ```
pub async fn run_all(
    configs: Vec<CrawlConfig>,
    fetcher: Fetcher,
    fresh: bool,
    cancel: CancellationToken,
) -> Vec<CrawlReport> {
    let mut tasks = JoinSet::new();

    for (index, config) in configs.into_iter().enumerate() {
        let fetcher = fetcher.clone();
        let cancel = cancel.clone();
        let span = tracing::info_span!("crawl", seed = %config.start_url);

        tasks.spawn(
            async move {
                let start_url = config.start_url.clone();
                let mut coordinator = match Coordinator::new(config, fetcher, fresh) {
                    Ok(coordinator) => coordinator,
                    Err(e) => {
                        tracing::error!("Failed to start crawler for {}: {}", start_url, e);
                        return None;
                    }
                };

                Some((index, coordinator.run(&cancel).await))
            }
            .instrument(span),
        );
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(e) => tracing::error!("Crawl task failed: {}", e),
        }
    }

    reports.sort_by_key(|(index, _)| *index);
    reports.into_iter().map(|(_, report)| report).collect()
}

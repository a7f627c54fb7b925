use std::collections::HashSet;

/// Durable progress of one crawl instance
///
/// This is what a checkpoint captures and what a restarted crawl resumes
/// from. `visited_urls` only ever grows, and `pages_processed` counts every
/// page record written over the crawl's lifetime, across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlState {
    /// URLs that have been fetched and processed
    pub visited_urls: HashSet<String>,

    /// Number of page records successfully written
    pub pages_processed: u64,

    /// Frontier snapshot, in queue order, at the time of the checkpoint
    pub pending_urls: Vec<String>,
}

impl CrawlState {
    /// Creates an empty state for a crawl that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.visited_urls.is_empty() && self.pages_processed == 0 && self.pending_urls.is_empty()
    }

    /// Returns the visited URLs in sorted order
    ///
    /// Checkpoints are written with this ordering so that two checkpoints of
    /// the same state are byte-identical.
    pub fn sorted_visited(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.visited_urls.iter().map(String::as_str).collect();
        urls.sort_unstable();
        urls
    }
}

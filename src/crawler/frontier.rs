//! Frontier and dedup store for a single crawl
//!
//! The frontier is a plain FIFO queue: URLs come out in the order they were
//! discovered, which makes the crawl breadth-first. Deduplication happens at
//! both ends. `enqueue` drops URLs that are already visited, and callers check
//! `is_visited` again after `dequeue`, because two pages can queue the same
//! link before either copy is fetched.

use std::collections::{HashSet, VecDeque};

/// Pending URLs plus the set of URLs already processed
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier with nothing visited
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty frontier that remembers `visited` from an earlier run
    pub fn with_visited(visited: HashSet<String>) -> Self {
        Self {
            queue: VecDeque::new(),
            visited,
        }
    }

    /// Appends URLs to the tail in order, skipping visited ones
    ///
    /// Duplicates of URLs that are merely queued are kept; they are filtered
    /// out when dequeued.
    ///
    /// # Returns
    ///
    /// The number of URLs actually appended
    pub fn enqueue<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.queue.len();

        for url in urls {
            if !self.visited.contains(&url) {
                self.queue.push_back(url);
            }
        }

        self.queue.len() - before
    }

    /// Pops the oldest queued URL
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Puts a dequeued URL back at the head of the queue
    ///
    /// Used when a URL was taken but never processed. Visited URLs are
    /// ignored.
    pub fn requeue_front(&mut self, url: String) {
        if !self.visited.contains(&url) {
            self.queue.push_front(url);
        }
    }

    /// Returns true if `url` has already been processed
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records `url` as processed
    ///
    /// Returns false if it was already recorded.
    pub fn mark_visited(&mut self, url: String) -> bool {
        self.visited.insert(url)
    }

    /// Returns the number of queued URLs, duplicates included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the visited set
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Returns the queued URLs that still need a visit, in queue order
    pub fn pending(&self) -> Vec<String> {
        self.queue
            .iter()
            .filter(|url| !self.visited.contains(url.as_str()))
            .cloned()
            .collect()
    }
}

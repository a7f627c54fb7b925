//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::state::CrawlState;
use crate::storage::PageRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Page record for {url} has an empty title")]
    EmptyTitle { url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// A backend belongs to exactly one crawl instance and is never shared, so
/// every method takes the backend directly without any locking.
pub trait Storage {
    // ===== Page Records =====

    /// Persists one page record
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the record was written
    /// * `Err(StorageError)` - The record was not written; the caller must
    ///   not count it as processed
    fn store_page(&mut self, record: &PageRecord) -> StorageResult<PathBuf>;

    // ===== Checkpoints =====

    /// Replaces the previous checkpoint with `state`
    fn save_checkpoint(&mut self, state: &CrawlState) -> StorageResult<()>;

    /// Reads the last checkpoint
    ///
    /// # Returns
    ///
    /// * `Ok(Some(CrawlState))` - A checkpoint exists and was parsed
    /// * `Ok(None)` - No checkpoint has been written yet
    /// * `Err(StorageError)` - A checkpoint exists but could not be read
    fn load_checkpoint(&self) -> StorageResult<Option<CrawlState>>;

    /// Reads the last checkpoint, falling back to an empty state
    ///
    /// A corrupt checkpoint restarts the crawl instead of aborting it.
    fn load_state(&self) -> CrawlState {
        match self.load_checkpoint() {
            Ok(Some(state)) => {
                tracing::info!(
                    "Loaded progress: {} pages previously crawled, {} URLs visited",
                    state.pages_processed,
                    state.visited_urls.len()
                );
                state
            }
            Ok(None) => CrawlState::new(),
            Err(e) => {
                tracing::error!("Error loading progress: {}", e);
                CrawlState::new()
            }
        }
    }
}

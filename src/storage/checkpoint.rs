//! On-disk checkpoint format
//!
//! A checkpoint is a single JSON object:
//!
//! ```json
//! {"visited_urls": ["..."], "pages_processed": 42, "pending_urls": ["..."]}
//! ```
//!
//! Every key is optional when reading. A file without `pages_processed`
//! counts one processed page per visited URL.

use crate::state::CrawlState;
use serde::{Deserialize, Serialize};

/// File name of the checkpoint inside a crawl directory
pub const CHECKPOINT_FILE_NAME: &str = "crawl_progress.json";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CheckpointFile {
    #[serde(default)]
    visited_urls: Vec<String>,

    #[serde(default)]
    pages_processed: Option<u64>,

    #[serde(default)]
    pending_urls: Vec<String>,
}

impl From<&CrawlState> for CheckpointFile {
    fn from(state: &CrawlState) -> Self {
        Self {
            visited_urls: state
                .sorted_visited()
                .into_iter()
                .map(str::to_string)
                .collect(),
            pages_processed: Some(state.pages_processed),
            pending_urls: state.pending_urls.clone(),
        }
    }
}

impl From<CheckpointFile> for CrawlState {
    fn from(file: CheckpointFile) -> Self {
        let pages_processed = file
            .pages_processed
            .unwrap_or(file.visited_urls.len() as u64);

        Self {
            visited_urls: file.visited_urls.into_iter().collect(),
            pages_processed,
            pending_urls: file.pending_urls,
        }
    }
}

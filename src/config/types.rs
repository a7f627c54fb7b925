use serde::Deserialize;
use std::path::PathBuf;

/// Page budget applied when a crawl entry omits `max-pages`
pub const DEFAULT_MAX_PAGES: u64 = 10_000;

/// Main configuration structure for Wiki-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Independent crawl instances, one per seed topic
    #[serde(rename = "crawl", default)]
    pub crawls: Vec<CrawlConfig>,
}

/// A single crawl instance
///
/// Rate-limit bounds and the checkpoint interval are fixed by the crawler and
/// deliberately not part of this surface.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed page the crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Directory receiving page records and the checkpoint file
    pub directory: PathBuf,

    /// Maximum number of page records written over the crawl's lifetime
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u64,
}

impl CrawlConfig {
    /// Creates a crawl configuration
    pub fn new(start_url: impl Into<String>, directory: impl Into<PathBuf>, max_pages: u64) -> Self {
        Self {
            start_url: start_url.into(),
            directory: directory.into(),
            max_pages,
        }
    }
}

fn default_max_pages() -> u64 {
    DEFAULT_MAX_PAGES
}

//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier and visited set
//! - Rate-limited HTTP fetching
//! - Article extraction and link discovery
//! - The per-instance crawl loop and multi-instance coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{run_all, Coordinator, CrawlReport, CHECKPOINT_INTERVAL};
pub use extractor::{extract, extract_html};
pub use fetcher::{
    build_http_client, FetchError, Fetcher, MAX_REQUEST_DELAY, MIN_REQUEST_DELAY, USER_AGENT,
};
pub use frontier::Frontier;

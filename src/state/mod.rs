//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: visited URLs, pages-processed counter, and pending frontier;
//!   the unit a checkpoint saves and restores
//! - `CrawlStatus`: the Running / Finished / Interrupted lifecycle of one crawl

mod crawl_state;
mod crawl_status;

// Re-export main types
pub use crawl_state::CrawlState;
pub use crawl_status::CrawlStatus;

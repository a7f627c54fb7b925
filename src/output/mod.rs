//! Output module for reporting crawl results
//!
//! Page records themselves are written by the storage layer; this module only
//! renders the human-readable summary shown when a run ends.

mod summary;

pub use summary::{format_summary, print_summary};

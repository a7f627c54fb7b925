//! Configuration module for Wiki-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration lists one or more crawl instances, each with its own seed,
//! output directory, and page budget.
//!
//! # Example
//!
//! ```no_run
//! use wiki_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawls.toml")).unwrap();
//! for crawl in &config.crawls {
//!     println!("{} -> {}", crawl.start_url, crawl.directory.display());
//! }
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, DEFAULT_MAX_PAGES};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

//! Storage module for persisting crawl data
//!
//! This module handles everything a crawl writes to disk:
//! - One JSON page record per successfully extracted page
//! - A checkpoint of the crawl state, overwritten on every save
//! - Loading that checkpoint back when a crawl restarts

mod checkpoint;
mod json;
mod traits;

pub use checkpoint::CHECKPOINT_FILE_NAME;
pub use json::JsonStorage;
pub use traits::{Storage, StorageError, StorageResult};

use serde::{Deserialize, Serialize};

/// Characters that cannot appear in a file name on common filesystems
const UNSAFE_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replacement for each unsafe character in a file name
pub const FILE_NAME_SUBSTITUTE: char = '_';

/// The structured content extracted from one wiki page
///
/// Created once per successfully parsed page and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The page URL
    pub url: String,

    /// The article title
    pub title: String,

    /// Body paragraphs in document order, each tagged with its section
    pub paragraphs: Vec<Paragraph>,

    /// Unvisited content-page links found anywhere on the page
    pub links: Vec<String>,

    /// Heading labels from the page's table of contents
    pub table_of_contents: Vec<String>,
}

/// A paragraph of body text and the section heading it falls under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Most recent section heading before this paragraph, or empty
    pub section: String,

    /// Trimmed paragraph text
    pub text: String,
}

impl Paragraph {
    /// Creates a paragraph under `section`
    pub fn new(section: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            text: text.into(),
        }
    }
}

/// Derives a file name from a page title
///
/// Each of `< > : " / \ | ? *` is replaced by `_`; everything else is kept.
///
/// # Examples
///
/// ```
/// use wiki_ripple::storage::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("AC/DC"), "AC_DC");
/// assert_eq!(sanitize_file_name("Who? What?"), "Who_ What_");
/// ```
pub fn sanitize_file_name(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if UNSAFE_FILE_NAME_CHARS.contains(&c) {
                FILE_NAME_SUBSTITUTE
            } else {
                c
            }
        })
        .collect()
}

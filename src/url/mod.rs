//! URL handling module for Wiki-Ripple
//!
//! This module decides which hrefs name wiki content pages and turns them
//! into the absolute URLs the frontier and visited set are keyed on.

mod matcher;
mod resolve;

use url::Url;

// Re-export main functions
pub use matcher::{is_content_path, CONTENT_PATH_PREFIX};
pub use resolve::resolve_link;

/// Resolves an href if, and only if, it points at a content page
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `base_url` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Some(String)` - Absolute URL of the linked content page
/// * `None` - The href is not a content page link
pub fn content_link(href: &str, base_url: &Url) -> Option<String> {
    if is_content_path(href) {
        resolve_link(href, base_url)
    } else {
        None
    }
}

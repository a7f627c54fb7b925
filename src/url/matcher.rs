/// Path prefix shared by every article on a MediaWiki site
pub const CONTENT_PATH_PREFIX: &str = "/wiki/";

/// Checks if an href points at a wiki content page
///
/// Content pages live directly under `/wiki/`. Anything carrying a namespace
/// prefix (`/wiki/Special:Random`, `/wiki/File:Map.png`) or a fragment
/// (`/wiki/Rome#History`) is not an article in its own right and is rejected.
/// Only site-relative hrefs match; absolute URLs, even to the same site, do not.
///
/// # Examples
///
/// ```
/// use wiki_ripple::url::is_content_path;
///
/// assert!(is_content_path("/wiki/Culture"));
/// assert!(!is_content_path("/wiki/Help:Contents"));
/// assert!(!is_content_path("/wiki/Culture#Etymology"));
/// assert!(!is_content_path("https://en.wikipedia.org/wiki/Culture"));
/// ```
pub fn is_content_path(href: &str) -> bool {
    match href.strip_prefix(CONTENT_PATH_PREFIX) {
        Some(title) => !title.contains([':', '#']),
        None => false,
    }
}

use url::Url;

/// Resolves an href against the page it was found on
///
/// The returned string is the identity key used for deduplication: two links
/// are the same page exactly when their resolved strings are equal.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_ripple::url::resolve_link;
///
/// let base = Url::parse("https://en.wikipedia.org/wiki/History").unwrap();
/// assert_eq!(
///     resolve_link("/wiki/Culture", &base).as_deref(),
///     Some("https://en.wikipedia.org/wiki/Culture")
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok().map(|url| url.to_string())
}

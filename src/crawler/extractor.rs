//! Content extractor for MediaWiki article pages
//!
//! This module turns a parsed page into a `PageRecord`:
//! - Title from the `#firstHeading` element
//! - Body paragraphs from the top level of `div.mw-parser-output`, each tagged
//!   with the `h2` section it appears under
//! - Outline from the `span.toctext` entries of the `#toc` element
//! - Content-page links from every anchor in the document

use crate::storage::{PageRecord, Paragraph};
use crate::url::content_link;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Parses HTML and extracts a page record from it
///
/// Convenience wrapper around [`extract`] for callers holding the raw body.
///
/// # Arguments
///
/// * `html` - The page body
/// * `url` - The URL the body was fetched from; links are resolved against it
/// * `visited` - URLs to leave out of the record's links
///
/// # Returns
///
/// * `Some(PageRecord)` - The page looks like an article
/// * `None` - The page has no title heading, or `url` is not absolute
pub fn extract_html(html: &str, url: &str, visited: &HashSet<String>) -> Option<PageRecord> {
    let base_url = Url::parse(url).ok()?;
    let document = Html::parse_document(html);
    extract(&document, &base_url, visited)
}

/// Extracts a page record from a parsed document
///
/// A page without a `#firstHeading` element is not treated as an article:
/// it yields `None`, and none of its links are returned either.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use std::collections::HashSet;
/// use url::Url;
/// use wiki_ripple::crawler::extract;
///
/// let html = r#"<html><body>
///     <h1 id="firstHeading">Culture</h1>
///     <div class="mw-parser-output"><p>Culture is...</p></div>
///     <a href="/wiki/Society">Society</a>
/// </body></html>"#;
///
/// let document = Html::parse_document(html);
/// let base_url = Url::parse("https://en.wikipedia.org/wiki/Culture").unwrap();
/// let record = extract(&document, &base_url, &HashSet::new()).unwrap();
///
/// assert_eq!(record.title, "Culture");
/// assert_eq!(record.links, vec!["https://en.wikipedia.org/wiki/Society"]);
/// ```
pub fn extract(document: &Html, base_url: &Url, visited: &HashSet<String>) -> Option<PageRecord> {
    let title = extract_title(document)?;

    Some(PageRecord {
        url: base_url.to_string(),
        title,
        paragraphs: extract_paragraphs(document),
        links: extract_links(document, base_url, visited),
        table_of_contents: extract_table_of_contents(document),
    })
}

/// Extracts the article title
///
/// An empty heading still counts as present; it produces an empty title.
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("#firstHeading").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
}

/// Walks the top level of the content area, tracking the current section
fn extract_paragraphs(document: &Html) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();

    let Ok(content_selector) = Selector::parse("div.mw-parser-output") else {
        return paragraphs;
    };
    let Some(content) = document.select(&content_selector).next() else {
        return paragraphs;
    };

    let mut current_section = String::new();

    for element in content.children().filter_map(ElementRef::wrap) {
        if let Some(heading) = section_heading(&element) {
            current_section = heading;
            continue;
        }

        if element.value().name() == "p" {
            let text = element_text(&element);
            if !text.is_empty() {
                paragraphs.push(Paragraph::new(current_section.clone(), text));
            }
        }
    }

    paragraphs
}

/// Returns the section label if `element` is a top-level section heading
///
/// Older MediaWiki output places the `h2` directly in the content area, with
/// the label inside `span.mw-headline` next to an edit link. Current output
/// wraps the `h2` in `div.mw-heading2` and keeps the edit link outside it.
fn section_heading(element: &ElementRef) -> Option<String> {
    let h2 = match element.value().name() {
        "h2" => *element,
        "div" if element.value().classes().any(|class| class == "mw-heading2") => {
            let selector = Selector::parse("h2").ok()?;
            let h2 = element.select(&selector).next()?;
            h2
        }
        _ => return None,
    };

    let selector = Selector::parse("span.mw-headline").ok()?;
    let headline = h2.select(&selector).next();
    Some(element_text(&headline.unwrap_or(h2)))
}

/// Collects the table of contents entries, if the page has one
fn extract_table_of_contents(document: &Html) -> Vec<String> {
    let (Ok(toc_selector), Ok(entry_selector)) =
        (Selector::parse("#toc"), Selector::parse("span.toctext"))
    else {
        return Vec::new();
    };

    match document.select(&toc_selector).next() {
        Some(toc) => toc
            .select(&entry_selector)
            .map(|entry| element_text(&entry))
            .collect(),
        None => Vec::new(),
    }
}

/// Collects unvisited content-page links from the whole document
///
/// Links are returned in document order. A page linking the same article
/// twice yields it twice; the frontier deals with repeats.
fn extract_links(document: &Html, base_url: &Url, visited: &HashSet<String>) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| content_link(href, base_url))
        .filter(|url| !visited.contains(url))
        .collect()
}

/// Concatenated, trimmed text of an element and its descendants
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

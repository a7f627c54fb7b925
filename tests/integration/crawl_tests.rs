//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock wiki servers and test
//! the full crawl cycle end-to-end against temporary directories.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiki_ripple::config::CrawlConfig;
use wiki_ripple::crawler::{run_all, Coordinator, Fetcher};
use wiki_ripple::state::{CrawlState, CrawlStatus};
use wiki_ripple::storage::{JsonStorage, PageRecord, Storage, CHECKPOINT_FILE_NAME};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher without the politeness delay
fn fast_fetcher() -> Fetcher {
    Fetcher::new()
        .expect("Failed to build fetcher")
        .with_delay(Duration::ZERO, Duration::ZERO)
}

/// Renders a minimal MediaWiki-style article linking to `links`
fn article(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, link, link))
        .collect();

    format!(
        r#"<html><head><title>{title} - Wiki</title></head><body>
        <h1 id="firstHeading">{title}</h1>
        <div class="mw-parser-output">
            <p>{title} is a test article.</p>
            <h2>See also</h2>
            <ul>{anchors}</ul>
        </div>
        </body></html>"#
    )
}

/// Mounts an article that must be fetched exactly `times` times
async fn mount_article(server: &MockServer, title: &str, links: &[&str], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", title)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article(title, links))
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Reads every page record in a crawl directory
fn read_records(dir: &Path) -> Vec<PageRecord> {
    std::fs::read_dir(dir)
        .expect("Failed to read crawl directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "json")
                && path.file_name().is_some_and(|name| name != CHECKPOINT_FILE_NAME)
        })
        .map(|path| {
            let content = std::fs::read_to_string(&path).expect("Failed to read record");
            serde_json::from_str(&content).expect("Failed to parse record")
        })
        .collect()
}

fn load_checkpoint(dir: &Path) -> CrawlState {
    JsonStorage::open(dir)
        .expect("Failed to open storage")
        .load_checkpoint()
        .expect("Failed to read checkpoint")
        .expect("No checkpoint written")
}

fn wiki_url(server: &MockServer, title: &str) -> String {
    format!("{}/wiki/{}", server.uri(), title)
}

#[tokio::test]
async fn test_full_crawl_single_seed() {
    let server = MockServer::start().await;
    mount_article(&server, "Seed", &["Alpha", "Beta"], 1).await;
    mount_article(&server, "Alpha", &["Beta", "Seed"], 1).await;
    mount_article(&server, "Beta", &["Alpha"], 1).await;

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 100);

    let mut coordinator =
        Coordinator::new(config, fast_fetcher(), false).expect("Failed to create coordinator");
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_processed, 3);
    assert_eq!(report.pages_stored, 3);
    assert_eq!(report.pending, 0);

    let records = read_records(tmp.path());
    assert_eq!(records.len(), 3);

    // No URL is written twice.
    let urls: HashSet<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls.len(), records.len());

    let seed = records.iter().find(|r| r.title == "Seed").unwrap();
    assert_eq!(seed.url, wiki_url(&server, "Seed"));
    assert_eq!(
        seed.links,
        vec![wiki_url(&server, "Alpha"), wiki_url(&server, "Beta")]
    );
    assert_eq!(seed.paragraphs[0].section, "");
    assert_eq!(seed.paragraphs[0].text, "Seed is a test article.");

    let checkpoint = load_checkpoint(tmp.path());
    assert_eq!(checkpoint.pages_processed, records.len() as u64);
    assert_eq!(checkpoint.visited_urls.len(), 3);
    assert!(checkpoint.pending_urls.is_empty());
}

#[tokio::test]
async fn test_page_budget_stops_before_discovered_links() {
    let server = MockServer::start().await;
    let links = ["One", "Two", "Three", "Four", "Five"];
    mount_article(&server, "Seed", &links, 1).await;
    for link in links {
        mount_article(&server, link, &[], 0).await;
    }

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 1);

    let mut coordinator = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_processed, 1);
    assert_eq!(report.pending, 5);
    assert_eq!(read_records(tmp.path()).len(), 1);

    let checkpoint = load_checkpoint(tmp.path());
    assert_eq!(checkpoint.pending_urls.len(), 5);
}

#[tokio::test]
async fn test_resume_never_refetches_visited() {
    let server = MockServer::start().await;
    mount_article(&server, "Gamma", &["Alpha", "Beta", "Delta"], 1).await;
    mount_article(&server, "Delta", &["Alpha", "Gamma"], 1).await;
    mount_article(&server, "Alpha", &[], 0).await;
    mount_article(&server, "Beta", &[], 0).await;

    let tmp = TempDir::new().unwrap();

    // A previous run already visited Alpha and Beta.
    let mut previous = CrawlState::new();
    previous.visited_urls.insert(wiki_url(&server, "Alpha"));
    previous.visited_urls.insert(wiki_url(&server, "Beta"));
    previous.pages_processed = 2;
    JsonStorage::open(tmp.path())
        .unwrap()
        .save_checkpoint(&previous)
        .unwrap();

    let config = CrawlConfig::new(wiki_url(&server, "Gamma"), tmp.path(), 100);
    let mut coordinator = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_stored, 2);
    assert_eq!(report.pages_processed, 4);

    // Records for visited pages are not listed as links either.
    let records = read_records(tmp.path());
    assert_eq!(records.len(), 2);
    let gamma = records.iter().find(|r| r.title == "Gamma").unwrap();
    assert_eq!(gamma.links, vec![wiki_url(&server, "Delta")]);

    let checkpoint = load_checkpoint(tmp.path());
    assert_eq!(checkpoint.pages_processed, 4);
    assert_eq!(checkpoint.visited_urls.len(), 4);
}

#[tokio::test]
async fn test_interrupted_crawl_resumes_from_pending() {
    let server = MockServer::start().await;
    mount_article(&server, "Seed", &["Alpha", "Beta"], 1).await;
    mount_article(&server, "Alpha", &[], 1).await;
    mount_article(&server, "Beta", &[], 1).await;

    let tmp = TempDir::new().unwrap();

    // First run stops after the seed.
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 1);
    let mut first = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = first.run(&CancellationToken::new()).await;
    assert_eq!(report.pages_processed, 1);

    // Second run with a larger budget picks up the queued links.
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 100);
    let mut second = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = second.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_stored, 2);
    assert_eq!(report.pages_processed, 3);
    assert_eq!(read_records(tmp.path()).len(), 3);
}

#[tokio::test]
async fn test_checkpoint_survives_restart() {
    let server = MockServer::start().await;
    mount_article(&server, "Seed", &["Alpha"], 1).await;
    mount_article(&server, "Alpha", &[], 1).await;

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 100);

    let mut coordinator = Coordinator::new(config.clone(), fast_fetcher(), false).unwrap();
    coordinator.run(&CancellationToken::new()).await;
    let visited_before = coordinator.frontier().visited().clone();

    let restarted = Coordinator::new(config, fast_fetcher(), false).unwrap();

    assert_eq!(restarted.frontier().visited(), &visited_before);
    assert_eq!(restarted.pages_processed(), 2);
    assert!(restarted.frontier().pending().is_empty());
}

#[tokio::test]
async fn test_untitled_page_contributes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Portal"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <h1>Welcome</h1>
            <a href="/wiki/Alpha">Alpha</a>
            <a href="/wiki/Beta">Beta</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount_article(&server, "Alpha", &[], 0).await;
    mount_article(&server, "Beta", &[], 0).await;

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Portal"), tmp.path(), 100);

    let mut coordinator = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_processed, 0);
    assert_eq!(report.visited, 0);
    assert_eq!(report.pending, 0);
    assert!(read_records(tmp.path()).is_empty());

    let checkpoint = load_checkpoint(tmp.path());
    assert!(checkpoint.visited_urls.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_is_skipped_not_visited() {
    let server = MockServer::start().await;
    mount_article(&server, "Seed", &["Missing", "Alpha"], 1).await;
    mount_article(&server, "Alpha", &["Missing"], 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 100);

    let mut coordinator = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.status, CrawlStatus::Finished);
    assert_eq!(report.pages_processed, 2);

    let checkpoint = load_checkpoint(tmp.path());
    assert!(!checkpoint
        .visited_urls
        .contains(&wiki_url(&server, "Missing")));
    assert!(checkpoint.visited_urls.contains(&wiki_url(&server, "Alpha")));
}

#[tokio::test]
async fn test_link_queued_twice_is_fetched_once() {
    let server = MockServer::start().await;
    mount_article(&server, "Seed", &["Alpha", "Beta"], 1).await;
    mount_article(&server, "Alpha", &["Shared"], 1).await;
    mount_article(&server, "Beta", &["Shared"], 1).await;
    mount_article(&server, "Shared", &[], 1).await;

    let tmp = TempDir::new().unwrap();
    let config = CrawlConfig::new(wiki_url(&server, "Seed"), tmp.path(), 100);

    let mut coordinator = Coordinator::new(config, fast_fetcher(), false).unwrap();
    let report = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(report.pages_processed, 4);
    assert_eq!(read_records(tmp.path()).len(), 4);
}

#[tokio::test]
async fn test_parallel_instances_are_independent() {
    let history = MockServer::start().await;
    mount_article(&history, "History", &["Past"], 1).await;
    mount_article(&history, "Past", &[], 1).await;

    let politics = MockServer::start().await;
    mount_article(&politics, "Politics", &["Power", "State"], 1).await;
    mount_article(&politics, "Power", &[], 1).await;
    mount_article(&politics, "State", &[], 0).await;

    let tmp = TempDir::new().unwrap();
    let history_dir = tmp.path().join("history_wiki");
    let politics_dir = tmp.path().join("politics_wiki");

    let configs = vec![
        CrawlConfig::new(wiki_url(&history, "History"), &history_dir, 100),
        CrawlConfig::new(wiki_url(&politics, "Politics"), &politics_dir, 2),
    ];

    let reports = run_all(configs, fast_fetcher(), false, CancellationToken::new()).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].start_url, wiki_url(&history, "History"));
    assert_eq!(reports[0].pages_processed, 2);
    assert_eq!(reports[1].start_url, wiki_url(&politics, "Politics"));
    assert_eq!(reports[1].pages_processed, 2);
    assert_eq!(reports[1].pending, 1);

    assert_eq!(read_records(&history_dir).len(), 2);
    assert_eq!(read_records(&politics_dir).len(), 2);
}

#[tokio::test]
async fn test_run_all_cancelled_still_checkpoints() {
    let tmp = TempDir::new().unwrap();
    let dirs = [tmp.path().join("a"), tmp.path().join("b")];

    let configs = vec![
        CrawlConfig::new("https://en.wikipedia.org/wiki/History", &dirs[0], 10),
        CrawlConfig::new("https://en.wikipedia.org/wiki/Politics", &dirs[1], 10),
    ];

    let cancel = CancellationToken::new();
    cancel.cancel();
    let reports = run_all(configs, fast_fetcher(), false, cancel).await;

    assert_eq!(reports.len(), 2);
    for (report, dir) in reports.iter().zip(&dirs) {
        assert_eq!(report.status, CrawlStatus::Interrupted);
        assert!(dir.join(CHECKPOINT_FILE_NAME).exists());
    }
}

use crate::config::types::{Config, CrawlConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawls.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[crawl]] entry is required".to_string(),
        ));
    }

    for crawl in &config.crawls {
        validate_crawl_config(crawl)?;
    }

    validate_distinct_directories(&config.crawls)?;

    Ok(())
}

/// Validates a single crawl instance
fn validate_crawl_config(crawl: &CrawlConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&crawl.start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start-url '{}': {}", crawl.start_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start-url '{}' must use http or https",
            crawl.start_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "start-url '{}' has no host",
            crawl.start_url
        )));
    }

    if crawl.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!(
            "directory cannot be empty (crawl for '{}')",
            crawl.start_url
        )));
    }

    if crawl.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {} (crawl for '{}')",
            crawl.max_pages, crawl.start_url
        )));
    }

    Ok(())
}

/// Instances never share state, so each one needs its own directory
fn validate_distinct_directories(crawls: &[CrawlConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for crawl in crawls {
        if !seen.insert(crawl.directory.as_path()) {
            return Err(ConfigError::Validation(format!(
                "directory '{}' is used by more than one crawl",
                crawl.directory.display()
            )));
        }
    }

    Ok(())
}

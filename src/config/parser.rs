use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates the crawl configuration at `path`
///
/// Fails with `ConfigError::Io` when the file cannot be read,
/// `ConfigError::Parse` on malformed TOML, and `ConfigError::Validation` or
/// `ConfigError::InvalidUrl` when a `[[crawl]]` entry is unusable.
///
/// ```no_run
/// use std::path::Path;
/// use wiki_ripple::config::load_config;
///
/// let config = load_config(Path::new("crawls.toml")).unwrap();
/// println!("Crawl instances: {}", config.crawls.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of the configuration file
///
/// Logged at startup so runs over the same directories can be told apart
/// when the configuration changed between them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

/// Loads a configuration along with the hash of the exact bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_bytes(content.as_bytes())))
}

fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

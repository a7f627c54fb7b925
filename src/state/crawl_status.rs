/// Lifecycle states of a crawl instance
use std::fmt;

/// Represents where a crawl instance is in its lifecycle
///
/// A crawl starts `Running` and ends in exactly one of the two terminal
/// states. Both terminal states write the same final checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// The crawl loop is still pulling URLs from the frontier
    Running,

    /// The frontier emptied or the page budget was reached
    Finished,

    /// The crawl was cancelled before it finished
    Interrupted,
}

impl CrawlStatus {
    /// Returns true if the crawl has stopped
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns the lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use thiserror::Error;

/// Crawl-level failures. Persistence and asset-fetch problems are handled
/// (logged and skipped) at the point of recovery and never surface here.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The entry URL cannot be crawled at all. Fatal for the session and
    /// reported before any page work begins.
    #[error("this page cannot be archived: {0}")]
    UnsupportedTarget(String),

    /// The page never reached load-complete within the bounded wait.
    /// Recovered as an empty subtree below the root, fatal at the root.
    #[error("timed out waiting for {url} to finish loading")]
    LoadTimeout { url: String },

    #[error("failed to load {url}: {source}")]
    Load {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Page content could not be extracted. Recovered as an empty subtree.
    #[error("failed to extract content from {url}: {reason}")]
    Extraction { url: String, reason: String },
}

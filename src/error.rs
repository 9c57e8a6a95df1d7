/// Failures surfaced by the scraping pipeline.
///
/// Listing-stage errors abort a search; detail-stage errors are logged by the
/// orchestrator and the affected posting is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Embedded data not found: {0}")]
    NotFound(String),

    #[error("Malformed embedded data: {0}")]
    MalformedData(String),

    #[error("Unexpected data shape: missing '{0}'")]
    SchemaMismatch(String),

    #[error("No results: {0}")]
    NoResults(String),
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        ScrapeError::MalformedData(e.to_string())
    }
}

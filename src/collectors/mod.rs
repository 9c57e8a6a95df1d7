// Job board scrapers.
// Each site implements `JobScraper`; `get_scraper` maps a site name to one.

pub mod extract;
pub mod fetcher;
pub mod indeed;
pub mod pacing;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::models::job::{JobPosting, SearchQuery};

pub use indeed::Indeed;

/// A job board that can run a search and return parsed postings.
#[async_trait]
pub trait JobScraper: Send + Sync {
    /// Site name as accepted by `get_scraper`.
    fn name(&self) -> &str;

    /// Run one search. Listing failures are returned; individual posting
    /// failures are skipped.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, ScrapeError>;
}

/// Connection settings shared by all scrapers.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_interval: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: indeed::DEFAULT_BASE_URL.to_string(),
            user_agent: "JobScope/1.0".to_string(),
            request_interval: Duration::from_secs(1),
        }
    }
}

/// Resolve a scraper by site name. Unknown names fall back to Indeed, the
/// only site currently supported.
pub fn get_scraper(site: &str, config: &ScraperConfig) -> Result<Box<dyn JobScraper>, ScrapeError> {
    match site {
        "indeed" => Ok(Box::new(Indeed::from_config(config)?)),
        other => {
            tracing::warn!("Unknown site '{other}', using indeed");
            Ok(Box::new(Indeed::from_config(config)?))
        }
    }
}

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;

pub use collectors::{JobScraper, ScraperConfig, get_scraper};
pub use error::ScrapeError;
pub use models::job::{ExperienceLevel, JobPosting, SearchQuery};

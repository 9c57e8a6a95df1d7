use std::time::Duration;

use clap::Parser;

use crate::collectors::ScraperConfig;
use crate::models::job::{ExperienceLevel, SearchQuery};

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscope", about = "Search a job board and print the postings found")]
pub struct Config {
    /// Your job title (required)
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub job: String,

    /// Job location
    #[arg(long, default_value = "vancouver")]
    pub location: String,

    /// Experience level
    #[arg(long, value_enum, default_value_t = ExperienceLevel::Junior)]
    pub level: ExperienceLevel,

    /// Maximum number of results (0 for no cap)
    #[arg(long, default_value = "20")]
    pub limit: u32,

    /// Job board to search
    #[arg(long, env = "JOBSCOPE_SITE", default_value = "indeed")]
    pub site: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Base URL of the job board
    #[arg(long, env = "JOBSCOPE_BASE_URL", default_value = "https://indeed.com")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "JOBSCOPE_USER_AGENT", default_value = "JobScope/1.0")]
    pub user_agent: String,

    /// Minimum spacing between requests in milliseconds
    #[arg(long, env = "JOBSCOPE_DELAY_MS", default_value = "1000")]
    pub delay_ms: u64,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Config {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(&self.job, &self.location)
            .with_level(self.level)
            .with_limit(self.limit)
    }

    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            request_interval: Duration::from_millis(self.delay_ms),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One job listing as extracted from a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub posted_date: String,
    pub url: String,
    pub scraped_at: DateTime<Utc>,
}

/// Experience filter accepted by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExperienceLevel {
    #[default]
    Junior,
    Mid,
    Senior,
    Any,
}

/// Parameters for one search run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
    pub level: ExperienceLevel,
    /// Maximum number of postings to fetch; 0 means no cap.
    pub limit: u32,
}

impl SearchQuery {
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            level: ExperienceLevel::default(),
            limit: 20,
        }
    }

    pub fn with_level(mut self, level: ExperienceLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

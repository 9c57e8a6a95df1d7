use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scraper::{Html, Selector};

use crate::collectors::extract::{
    AttributeTree, array_at, extract_initial_data, object_at, require_path, string_or_empty,
};
use crate::collectors::fetcher::{Fetcher, HttpFetcher};
use crate::collectors::pacing::{FixedInterval, Pacer};
use crate::collectors::{JobScraper, ScraperConfig};
use crate::error::ScrapeError;
use crate::models::job::{ExperienceLevel, JobPosting, SearchQuery};

/// Unreserved characters (RFC 3986) are left as-is in query values.
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const DEFAULT_BASE_URL: &str = "https://indeed.com";

const POSTING_PATH: [&str; 2] = ["jobInfoWrapperModel", "jobInfoModel"];

/// Indeed search: one listing page, then one embedded detail view per job key.
pub struct Indeed {
    base_url: String,
    fetcher: Box<dyn Fetcher>,
    pacer: Box<dyn Pacer>,
}

impl Indeed {
    pub fn new(base_url: &str, fetcher: Box<dyn Fetcher>, pacer: Box<dyn Pacer>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
            pacer,
        }
    }

    /// Build a scraper that talks to the network with the configured agent
    /// and request interval.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Self::new(
            &config.base_url,
            Box::new(HttpFetcher::new(&config.user_agent)?),
            Box::new(FixedInterval::new(config.request_interval)),
        ))
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let limit = query.limit.to_string();
        let mut params = vec![("q", query.title.as_str()), ("l", query.location.as_str())];
        if query.limit > 0 {
            params.push(("limit", limit.as_str()));
        }
        if let Some(level) = experience_param(query.level) {
            params.push(("explvl", level));
        }

        let encoded: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect();
        format!("{}/jobs?{}", self.base_url, encoded.join("&"))
    }

    pub fn detail_url(&self, job_key: &str) -> String {
        format!(
            "{}/m/basecamp/viewjob?viewtype=embedded&jk={}",
            self.base_url,
            encode(job_key)
        )
    }

    async fn scrape_listing(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        self.pacer.wait().await;
        let fetched = self.fetcher.fetch(url).await;
        self.pacer.done().await;
        job_keys_from_listing(&fetched?)
    }

    async fn scrape_detail(&self, job_key: &str) -> Result<JobPosting, ScrapeError> {
        let url = self.detail_url(job_key);
        tracing::debug!("Fetching job detail {url}");
        self.pacer.wait().await;
        let fetched = self.fetcher.fetch(&url).await;
        self.pacer.done().await;
        let html = fetched?;
        let data = extract_initial_data(&html)?;
        parse_posting(&data, &self.base_url)
    }
}

#[async_trait]
impl JobScraper for Indeed {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, ScrapeError> {
        let url = self.search_url(query);
        tracing::info!("Searching {url}");

        let mut job_keys = self.scrape_listing(&url).await?;
        if query.limit > 0 {
            job_keys.truncate(query.limit as usize);
        }
        tracing::info!("Found {} job keys", job_keys.len());

        let mut postings = Vec::with_capacity(job_keys.len());
        for job_key in &job_keys {
            match self.scrape_detail(job_key).await {
                Ok(posting) => postings.push(posting),
                Err(e) => tracing::warn!("Skipping job {job_key}: {e}"),
            }
        }

        tracing::info!(
            "Scraped {} of {} postings",
            postings.len(),
            job_keys.len()
        );
        Ok(postings)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE_SET).to_string()
}

fn experience_param(level: ExperienceLevel) -> Option<&'static str> {
    match level {
        ExperienceLevel::Junior => Some("entry_level"),
        ExperienceLevel::Mid => Some("mid_level"),
        ExperienceLevel::Senior => Some("senior_level"),
        ExperienceLevel::Any => None,
    }
}

/// Job keys from a listing page: embedded data first, `data-jk` card
/// attributes as a fallback. The embedded-data error is returned when
/// neither route finds anything.
pub fn job_keys_from_listing(html: &str) -> Result<Vec<String>, ScrapeError> {
    let from_data = extract_initial_data(html).and_then(|data| mine_job_keys(&data));
    match from_data {
        Ok(keys) => Ok(keys),
        Err(e) => {
            let keys = job_keys_from_markup(html);
            if keys.is_empty() {
                return Err(e);
            }
            tracing::debug!("Embedded listing data unusable ({e}), using {} card keys", keys.len());
            Ok(keys)
        }
    }
}

/// Collect `jobkey` from each card under
/// `metaData.mosaicProviderJobCardsModel.results`. Cards without a usable key
/// are skipped.
pub fn mine_job_keys(data: &AttributeTree) -> Result<Vec<String>, ScrapeError> {
    let results = data
        .as_object()
        .and_then(|root| object_at(root, "metaData"))
        .and_then(|meta| object_at(meta, "mosaicProviderJobCardsModel"))
        .and_then(|model| array_at(model, "results"))
        .filter(|results| !results.is_empty())
        .ok_or_else(|| ScrapeError::NoResults("listing has no job cards".to_string()))?;

    let keys = dedup_preserving_order(
        results
            .iter()
            .filter_map(|card| card.get("jobkey")?.as_str())
            .filter(|key| !key.is_empty())
            .map(String::from),
    );

    if keys.is_empty() {
        return Err(ScrapeError::NoResults(
            "no job keys found in search results".to_string(),
        ));
    }
    Ok(keys)
}

fn job_keys_from_markup(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse("[data-jk]") else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    dedup_preserving_order(
        document
            .select(&selector)
            .filter_map(|el| el.value().attr("data-jk"))
            .filter(|key| !key.is_empty())
            .map(String::from),
    )
}

fn dedup_preserving_order(keys: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.filter(|key| seen.insert(key.clone())).collect()
}

/// Build a posting from a detail page's embedded data. Missing leaf fields
/// become empty strings; only a missing wrapper or model is an error.
pub fn parse_posting(data: &AttributeTree, base_url: &str) -> Result<JobPosting, ScrapeError> {
    let info = require_path(data, &POSTING_PATH)?;

    Ok(JobPosting {
        title: string_or_empty(info, "jobTitle"),
        company: string_or_empty(info, "companyName"),
        location: string_or_empty(info, "formattedLocation"),
        salary: string_or_empty(info, "salary"),
        description: string_or_empty(info, "sanitizedJobDescription"),
        posted_date: string_or_empty(info, "pubDate"),
        url: format!(
            "{base_url}/viewjob?jk={}",
            encode(&string_or_empty(info, "jobkey"))
        ),
        scraped_at: Utc::now(),
    })
}

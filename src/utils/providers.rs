use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    error::ProviderError,
    news::{Article, NewsFilters},
    provider::{GuardianEnvelope, GuardianItem, MediaStackItem, MediaStackResponse},
};

pub const GUARDIAN_SOURCE: &str = "The Guardian";
pub const GUARDIAN_DESCRIPTION: &str = "Read the full story on The Guardian";
pub const GUARDIAN_IMAGE: &str = "https://assets.guim.co.uk/images/guardian-logo-rss.png";
pub const GUARDIAN_DEFAULT_SECTION: &str = "world";

pub const MEDIASTACK_SOURCE: &str = "MediaStack";
pub const MEDIASTACK_IMAGE: &str = "https://mediastack.com/images/mediastack-logo.png";
pub const MEDIASTACK_DEFAULT_CATEGORY: &str = "general";

/// A news source reachable over HTTP with its own response schema.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        client: &Client,
        filters: &NewsFilters,
    ) -> Result<Vec<Article>, ProviderError>;
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<T, ProviderError> {
    let res = client.get(url).query(params).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(ProviderError::HttpStatus(status.as_u16()));
    }
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn parse_timestamp(raw: Option<&str>, fetched_at: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(fetched_at)
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct GuardianProvider {
    pub base_url: String,
    pub api_key: String,
}

impl GuardianProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Maps one Guardian result. Items without a title or link are dropped.
    pub fn normalize(item: GuardianItem, fetched_at: DateTime<Utc>) -> Option<Article> {
        Some(Article {
            title: present(item.web_title)?,
            url: present(item.web_url)?,
            description: GUARDIAN_DESCRIPTION.to_string(),
            published_at: parse_timestamp(item.web_publication_date.as_deref(), fetched_at),
            source: GUARDIAN_SOURCE.to_string(),
            url_to_image: GUARDIAN_IMAGE.to_string(),
            author: None,
            category: None,
            language: None,
            country: None,
        })
    }
}

#[async_trait]
impl NewsProvider for GuardianProvider {
    fn name(&self) -> &'static str {
        "guardian"
    }

    async fn fetch(
        &self,
        client: &Client,
        filters: &NewsFilters,
    ) -> Result<Vec<Article>, ProviderError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("api-key", self.api_key.as_str()),
            ("lang", filters.language.as_str()),
            ("section", filters.category_or(GUARDIAN_DEFAULT_SECTION)),
        ];
        if let Some(q) = filters.query.as_deref() {
            params.push(("q", q));
        }

        let envelope: GuardianEnvelope = get_json(client, &url, &params).await?;
        let response = envelope.response;
        if response.status.as_deref() == Some("error") {
            return Err(ProviderError::Api(response.message.unwrap_or_default()));
        }

        let fetched_at = Utc::now();
        let articles: Vec<Article> = response
            .results
            .into_iter()
            .filter_map(|item| Self::normalize(item, fetched_at))
            .collect();
        debug!(count = articles.len(), "Guardian returned articles");
        Ok(articles)
    }
}

#[derive(Debug, Clone)]
pub struct MediaStackProvider {
    pub base_url: String,
    pub api_key: String,
}

impl MediaStackProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Maps one MediaStack item, keeping its pass-through metadata.
    pub fn normalize(item: MediaStackItem, fetched_at: DateTime<Utc>) -> Option<Article> {
        Some(Article {
            title: present(item.title)?,
            url: present(item.url)?,
            description: item.description.unwrap_or_default(),
            published_at: parse_timestamp(item.published_at.as_deref(), fetched_at),
            source: MEDIASTACK_SOURCE.to_string(),
            url_to_image: present(item.image).unwrap_or_else(|| MEDIASTACK_IMAGE.to_string()),
            author: present(item.author),
            category: present(item.category),
            language: present(item.language),
            country: present(item.country),
        })
    }
}

#[async_trait]
impl NewsProvider for MediaStackProvider {
    fn name(&self) -> &'static str {
        "mediastack"
    }

    async fn fetch(
        &self,
        client: &Client,
        filters: &NewsFilters,
    ) -> Result<Vec<Article>, ProviderError> {
        let url = format!("{}/v1/news", self.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("access_key", self.api_key.as_str()),
            ("languages", filters.language.as_str()),
            ("countries", filters.country.as_str()),
            ("categories", filters.category_or(MEDIASTACK_DEFAULT_CATEGORY)),
        ];
        if let Some(q) = filters.query.as_deref() {
            params.push(("keywords", q));
        }

        let body: MediaStackResponse = get_json(client, &url, &params).await?;
        if let Some(err) = body.error {
            let detail = err.message.or(err.code).unwrap_or_default();
            return Err(ProviderError::Api(detail));
        }

        let fetched_at = Utc::now();
        let articles: Vec<Article> = body
            .data
            .into_iter()
            .filter_map(|item| Self::normalize(item, fetched_at))
            .collect();
        debug!(count = articles.len(), "MediaStack returned articles");
        Ok(articles)
    }
}

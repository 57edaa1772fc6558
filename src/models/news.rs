use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::{DEFAULT_COUNTRY, DEFAULT_LANGUAGE};

/// Normalized article returned by `GET /news`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub url: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub url_to_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NewsQuery {
    pub query: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
}

/// Resolved filters shared by every provider call of one request.
///
/// Empty strings count as absent. Category stays optional because each
/// provider has its own default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsFilters {
    pub query: Option<String>,
    pub language: String,
    pub country: String,
    pub category: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<NewsQuery> for NewsFilters {
    fn from(params: NewsQuery) -> Self {
        NewsFilters {
            query: non_empty(params.query),
            language: non_empty(params.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            country: non_empty(params.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            category: non_empty(params.category),
        }
    }
}

impl NewsFilters {
    pub fn category_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.category.as_deref().unwrap_or(default)
    }
}

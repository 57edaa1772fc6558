use std::sync::Arc;

use crate::{
    models::{
        error::Error,
        news::{NewsFilters, NewsQuery},
    },
    utils::{aggregator::merge_articles, state::AppState},
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::{error, info};

/// Lists providers that failed for this request. Absent when all succeeded.
pub static UNAVAILABLE_HEADER: HeaderName = HeaderName::from_static("x-news-unavailable");

const FETCH_FAILED: &str = "Failed to fetch news from all sources";

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsQuery>,
) -> Result<impl IntoResponse, Error> {
    let filters = NewsFilters::from(params);

    let outcomes = state
        .aggregator
        .fetch_all(&state.http_client, &filters)
        .await
        .map_err(|e| {
            error!(error = %e, "Error in news endpoint");
            Error::new(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        })?;

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.failed())
        .map(|o| o.provider)
        .collect();
    let articles = merge_articles(outcomes, &mut rand::rng());

    let mut headers = HeaderMap::new();
    if !failed.is_empty() {
        let value = HeaderValue::from_str(&failed.join(",")).map_err(|e| {
            error!(error = %e, "Unrepresentable provider names");
            Error::new(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        })?;
        headers.insert(UNAVAILABLE_HEADER.clone(), value);
    }

    info!(
        count = articles.len(),
        unavailable = failed.len(),
        query = filters.query.as_deref().unwrap_or(""),
        "Serving merged news"
    );
    Ok((StatusCode::OK, headers, Json(articles)))
}

use std::sync::Arc;

use futures::future::join_all;
use rand::{seq::SliceRandom, Rng};
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    models::{
        error::{AggregateError, ProviderError},
        news::{Article, NewsFilters},
    },
    utils::providers::NewsProvider,
};

/// What one provider contributed to a request.
#[derive(Debug)]
pub struct ProviderOutcome {
    pub provider: &'static str,
    pub result: Result<Vec<Article>, ProviderError>,
}

impl ProviderOutcome {
    pub fn failed(&self) -> bool {
        self.result.is_err()
    }
}

/// Fans a query out to every registered provider and merges what comes back.
#[derive(Clone)]
pub struct NewsAggregator {
    providers: Vec<Arc<dyn NewsProvider>>,
}

impl NewsAggregator {
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Runs every provider call as its own task. Outcomes come back in
    /// registration order. A provider error is an `Err` outcome, never an
    /// `Err` of this function; only a task that fails to complete is.
    pub async fn fetch_all(
        &self,
        client: &Client,
        filters: &NewsFilters,
    ) -> Result<Vec<ProviderOutcome>, AggregateError> {
        let handles = self.providers.iter().map(|provider| {
            let provider = provider.clone();
            let client = client.clone();
            let filters = filters.clone();
            let name = provider.name();
            let handle = tokio::spawn(async move { provider.fetch(&client, &filters).await });
            async move { (name, handle.await) }
        });

        let mut outcomes = Vec::with_capacity(self.providers.len());
        for (provider, joined) in join_all(handles).await {
            let result = joined.map_err(|source| AggregateError::Join { provider, source })?;
            match &result {
                Ok(articles) => info!(provider, count = articles.len(), "Provider fetch succeeded"),
                Err(error) => warn!(provider, %error, "Provider fetch failed, contributing no articles"),
            }
            outcomes.push(ProviderOutcome { provider, result });
        }
        Ok(outcomes)
    }
}

/// Concatenates successful contributions in order, then shuffles the whole list.
pub fn merge_articles<R: Rng + ?Sized>(outcomes: Vec<ProviderOutcome>, rng: &mut R) -> Vec<Article> {
    let mut merged: Vec<Article> = outcomes
        .into_iter()
        .filter_map(|o| o.result.ok())
        .flatten()
        .collect();
    merged.shuffle(rng);
    merged
}

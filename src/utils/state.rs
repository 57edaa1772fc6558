use std::{error::Error, sync::Arc, time::Duration};

use reqwest::Client;
use tracing::info;

use crate::utils::{
    aggregator::NewsAggregator,
    config::Config,
    providers::{GuardianProvider, MediaStackProvider, NewsProvider},
    user_store::UserStore,
};

pub struct AppState {
    pub config: Config,
    pub http_client: Client,
    pub users: UserStore,
    pub aggregator: NewsAggregator,
}

impl AppState {
    pub async fn init(config: Config) -> Result<Self, Box<dyn Error>> {
        let providers: Vec<Arc<dyn NewsProvider>> = vec![
            Arc::new(GuardianProvider::new(
                config.guardian_base_url.clone(),
                config.guardian_api_key.clone(),
            )),
            Arc::new(MediaStackProvider::new(
                config.mediastack_base_url.clone(),
                config.mediastack_api_key.clone(),
            )),
        ];
        Self::with_providers(config, providers).await
    }

    /// Same as `init`, but with an explicit provider list in merge order.
    pub async fn with_providers(
        config: Config,
        providers: Vec<Arc<dyn NewsProvider>>,
    ) -> Result<Self, Box<dyn Error>> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        info!("HTTP client initialized");

        let users = match &config.users_file {
            Some(path) => UserStore::open(path).await?,
            None => UserStore::in_memory(),
        };

        let aggregator = NewsAggregator::new(providers);
        info!(providers = ?aggregator.provider_names(), "News providers registered");

        Ok(AppState {
            config,
            http_client,
            users,
            aggregator,
        })
    }
}

//! Access to the external results feed

use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use crate::config::Config;
use crate::data_fetcher::models::{ExternalMatchRecord, FeedResponse};
use crate::error::AppError;

/// Source of authoritative match results.
#[allow(async_fn_in_trait)]
pub trait ResultsFeed {
    async fn fetch_records(&self) -> Result<Vec<ExternalMatchRecord>, AppError>;
}

/// [`ResultsFeed`] reading the JSON feed over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResultsFeed {
    client: Client,
    feed_url: String,
}

impl HttpResultsFeed {
    pub fn new(client: Client, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.feed_url.clone()))
    }
}

impl ResultsFeed for HttpResultsFeed {
    #[instrument(skip(self))]
    async fn fetch_records(&self) -> Result<Vec<ExternalMatchRecord>, AppError> {
        let response: FeedResponse = fetch(&self.client, &self.feed_url).await?;
        let records = response.into_records();
        info!("Loaded {} record(s) from results feed", records.len());
        Ok(records)
    }
}

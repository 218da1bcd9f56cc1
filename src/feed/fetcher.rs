use reqwest::Client;
use tokio::sync::oneshot;

use crate::api::{self, ApiRequest, Parameters, RequestMethod};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Article;

#[derive(Clone)]
pub struct TrendFetcher {
    client: Client,
    trend_feed_url: String,
}

impl TrendFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_client(api::build_client()?, &config.trend_feed_url))
    }

    pub fn with_client(client: Client, trend_feed_url: &str) -> Self {
        Self {
            client,
            trend_feed_url: trend_feed_url.to_string(),
        }
    }

    /// Fetch and decode the daily trend feed.
    ///
    /// Only transport errors and a non-JSON body fail the call. Items that do
    /// not decode are skipped, and a JSON document that is not an array
    /// yields an empty list.
    pub async fn fetch_daily_trends(&self) -> Result<Vec<Article>> {
        let request = ApiRequest::build(
            &self.trend_feed_url,
            "",
            RequestMethod::Get,
            &Parameters::new(),
        )?;

        let response = request.to_reqwest(&self.client).send().await?;

        // Status is not checked; whatever body came back gets decoded.
        if !response.status().is_success() {
            tracing::debug!(
                "Trend feed {} answered HTTP {}",
                self.trend_feed_url,
                response.status()
            );
        }

        let bytes = response.bytes().await?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;

        let articles = Article::load_list(&json);
        tracing::debug!("Decoded {} trending articles", articles.len());

        Ok(articles)
    }

    /// Run [`fetch_daily_trends`](Self::fetch_daily_trends) as a background
    /// task. The receiver resolves exactly once with the outcome.
    pub fn spawn_daily_trends(&self) -> oneshot::Receiver<Result<Vec<Article>>> {
        let (tx, rx) = oneshot::channel();
        let fetcher = self.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch_daily_trends().await;
            if tx.send(result).is_err() {
                tracing::debug!("Trend fetch finished after its receiver was dropped");
            }
        });

        rx
    }
}

/// Await a spawned fetch, folding a lost task into an error.
pub(crate) async fn receive(rx: oneshot::Receiver<Result<Vec<Article>>>) -> Result<Vec<Article>> {
    rx.await
        .map_err(|_| AppError::Other(anyhow::anyhow!("Trend fetch task ended without a result")))?
}

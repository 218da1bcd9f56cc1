use tokio::sync::watch;

use super::fetcher::{receive, TrendFetcher};
use crate::error::Result;
use crate::models::Article;

/// Caller-owned holder of the current daily trend list.
///
/// Views subscribe to it; only the owner publishes. A failed refresh keeps
/// the last published list.
pub struct TrendStore {
    daily_trends: watch::Sender<Vec<Article>>,
}

impl TrendStore {
    pub fn new() -> Self {
        let (daily_trends, _) = watch::channel(Vec::new());
        Self { daily_trends }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Article>> {
        self.daily_trends.subscribe()
    }

    pub fn daily_trends(&self) -> Vec<Article> {
        self.daily_trends.borrow().clone()
    }

    pub fn publish(&self, articles: Vec<Article>) {
        self.daily_trends.send_replace(articles);
    }

    /// Fetch in the background, then publish from the caller's context.
    /// Returns the number of articles published.
    pub async fn refresh(&self, fetcher: &TrendFetcher) -> Result<usize> {
        let articles = receive(fetcher.spawn_daily_trends()).await?;
        let count = articles.len();
        self.publish(articles);
        Ok(count)
    }
}

impl Default for TrendStore {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::Result;
use futures::future::join_all;
use tracing_subscriber::EnvFilter;

use qiita_trends::{Config, ImageFetcher, TrendFetcher, TrendStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let fetcher = TrendFetcher::new(&config)?;
    let images = ImageFetcher::new()?;
    let store = TrendStore::new();

    let count = store.refresh(&fetcher).await?;
    tracing::info!("Fetched {} trending articles", count);

    let articles = store.daily_trends();
    for (rank, article) in articles.iter().enumerate() {
        let badge = if article.is_new { " [new]" } else { "" };
        println!(
            "{:>2}. {}{}\n    @{}  LGTM {}",
            rank + 1,
            article.title,
            badge,
            article.author_id,
            article.likes_count
        );
    }

    let handles: Vec<_> = articles
        .iter()
        .map(|article| images.fetch(article.author_image_url.clone()))
        .collect();

    let loaded = join_all(handles.into_iter().map(|mut handle| async move {
        let bytes = handle.wait_loaded().await;
        (handle.url().clone(), bytes)
    }))
    .await;

    for (url, bytes) in loaded {
        match bytes {
            Some(bytes) => tracing::info!("Author image {} ({} bytes)", url, bytes.len()),
            None => tracing::info!("Author image {} still pending", url),
        }
    }

    Ok(())
}

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::watch;
use url::Url;

use crate::api;
use crate::error::Result;
use crate::models::ImageFetchState;

/// Downloads author images in the background. Every call is a fresh fetch;
/// nothing is cached.
#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(api::build_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Start downloading `url` right away and return a handle to observe it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch(&self, url: Url) -> ImageHandle {
        let (tx, rx) = watch::channel(ImageFetchState::Pending);
        let client = self.client.clone();
        let target = url.clone();

        tokio::spawn(async move {
            match download(&client, &target).await {
                Ok(bytes) => {
                    tracing::debug!("Loaded {} bytes from {}", bytes.len(), target);
                    tx.send_replace(ImageFetchState::Loaded(bytes));
                }
                // Dropping `tx` releases waiters; the state stays Pending.
                Err(e) => tracing::debug!("Failed to load image {}: {}", target, e),
            }
        });

        ImageHandle { url, state: rx }
    }
}

async fn download(client: &Client, url: &Url) -> Result<Arc<[u8]>> {
    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        tracing::debug!("Image {} answered HTTP {}", url, response.status());
    }
    let bytes = response.bytes().await?;
    Ok(Arc::from(bytes.as_ref()))
}

/// Observable state of one image download.
#[derive(Clone)]
pub struct ImageHandle {
    url: Url,
    state: watch::Receiver<ImageFetchState>,
}

impl ImageHandle {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn state(&self) -> ImageFetchState {
        self.state.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().is_loaded()
    }

    /// Wait for the next transition. Returns `false` once the download has
    /// finished and no further change can arrive.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// Wait until the download settles. `None` means it failed and the
    /// state is still Pending.
    pub async fn wait_loaded(&mut self) -> Option<Arc<[u8]>> {
        match self.state.wait_for(ImageFetchState::is_loaded).await {
            Ok(state) => state.bytes().cloned(),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn fetcher() -> ImageFetcher {
        ImageFetcher::with_client(Client::new())
    }

    #[tokio::test]
    async fn test_fetch_loads_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/a.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(PNG_HEADER)
            .expect(1)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/a.png", server.url())).unwrap();
        let mut handle = fetcher().fetch(url.clone());

        let bytes = handle.wait_loaded().await.unwrap();

        mock.assert_async().await;
        assert_eq!(&bytes[..], PNG_HEADER);
        assert_eq!(handle.url(), &url);
        assert_eq!(handle.state(), ImageFetchState::Loaded(Arc::from(PNG_HEADER)));
    }

    #[tokio::test]
    async fn test_fetch_transitions_once() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/a.png")
            .with_status(200)
            .with_body(PNG_HEADER)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/a.png", server.url())).unwrap();
        let mut handle = fetcher().fetch(url);

        assert!(handle.changed().await);
        assert!(handle.is_loaded());
        // The task is done; no second transition arrives.
        assert!(!handle.changed().await);
        assert!(handle.is_loaded());
    }

    #[tokio::test]
    async fn test_fetch_failure_stays_pending() {
        let url = Url::parse("http://127.0.0.1:1/a.png").unwrap();
        let mut handle = fetcher().fetch(url);

        assert_eq!(handle.wait_loaded().await, None);
        assert_eq!(handle.state(), ImageFetchState::Pending);
        assert!(!handle.is_loaded());
    }

    #[tokio::test]
    async fn test_same_url_is_fetched_again() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/a.png")
            .with_status(200)
            .with_body(PNG_HEADER)
            .expect(2)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/a.png", server.url())).unwrap();
        let fetcher = fetcher();

        let mut first = fetcher.fetch(url.clone());
        assert!(first.wait_loaded().await.is_some());

        let mut second = fetcher.fetch(url);
        assert_eq!(second.state(), ImageFetchState::Pending);
        assert!(second.wait_loaded().await.is_some());

        mock.assert_async().await;
    }
}

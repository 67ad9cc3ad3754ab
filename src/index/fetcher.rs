//! HTTP artifact download

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::index::error::IndexError;
use crate::index::registry::ArtifactFetcher;

/// Downloads release artifacts with a per-request timeout and no retries
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, IndexError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, IndexError> {
        debug!("Downloading artifact: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(IndexError::InvalidResponse(format!(
                "Download of {} returned status {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_body_bytes() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/packages/pkg-1.0.tar.gz")
            .with_status(200)
            .with_body(&[0x1f, 0x8b, 0x08, 0x00][..])
            .create_async()
            .await;

        let bytes = fetcher()
            .fetch(&format!("{}/packages/pkg-1.0.tar.gz", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, vec![0x1f, 0x8b, 0x08, 0x00]);
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/packages/gone.whl")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let result = fetcher()
            .fetch(&format!("{}/packages/gone.whl", server.url()))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(IndexError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_handles_network_error() {
        let result = fetcher().fetch("http://invalid.localhost.test:99999/x").await;

        assert!(matches!(result, Err(IndexError::Network(_))));
    }
}

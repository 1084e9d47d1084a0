use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, ClientBuilder};
use tokio::sync::Semaphore;

use crate::store::FileStore;

/// Retrieves the collected asset URLs and persists each body under the
/// store's `assets/` folder. Every fetch-and-save is independent: a
/// failure is logged and skipped, and the pass resolves only after all
/// attempts have settled.
pub struct AssetFetcher {
    client: Client,
    semaphore: Arc<Semaphore>,
}

impl AssetFetcher {
    pub fn new(max_concurrent: usize, request_timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(concat!("offlinify/", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        })
    }

    /// Fetches all URLs concurrently (permit-capped) and returns how many
    /// assets were actually saved.
    pub async fn fetch_all(&self, urls: &[String], store: &FileStore) -> usize {
        let downloads = urls.iter().map(|url| async move {
            let _permit = self
                .semaphore
                .acquire()
                .await
                .expect("asset semaphore closed");
            match self.fetch_one(url, store).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("Failed to download asset {}: {}", url, e);
                    false
                }
            }
        });

        futures::future::join_all(downloads)
            .await
            .into_iter()
            .filter(|saved| *saved)
            .count()
    }

    async fn fetch_one(&self, url: &str, store: &FileStore) -> Result<()> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        let content = response.bytes().await?;
        store.save_asset(url, &content)?;
        Ok(())
    }
}

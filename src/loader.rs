use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::ArchiveError;
use crate::page::{extract_snapshot, PageSnapshot};

/// An isolated, fully loaded page context. Owned exclusively by the crawl
/// branch that opened it and released on drop, after its subtree joins.
pub struct LoadedPage {
    url: Url,
    html: String,
}

impl LoadedPage {
    pub fn new(url: Url, html: String) -> Self {
        Self { url, html }
    }

    /// The page's final URL (after any redirects).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Runs extraction against the loaded content and marshals the result
    /// back as a plain-data snapshot.
    pub fn snapshot(&self) -> Result<PageSnapshot, ArchiveError> {
        extract_snapshot(&self.html, &self.url).map_err(|e| ArchiveError::Extraction {
            url: self.url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Browsing-context control: opens an isolated context for a URL and waits
/// until it is load-complete, within a bounded time.
pub trait PageLoader: Send + Sync {
    fn open<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<LoadedPage, ArchiveError>>;
}

/// Production loader: one bounded GET per page over a shared client.
pub struct HttpLoader {
    client: Client,
    load_timeout: Duration,
}

impl HttpLoader {
    pub fn new(load_timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(concat!("offlinify/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            load_timeout,
        })
    }
}

impl PageLoader for HttpLoader {
    fn open<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<LoadedPage, ArchiveError>> {
        Box::pin(async move {
            let load = async {
                let response =
                    self.client
                        .get(url.clone())
                        .send()
                        .await
                        .map_err(|source| ArchiveError::Load {
                            url: url.to_string(),
                            source,
                        })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(ArchiveError::BadStatus {
                        url: url.to_string(),
                        status,
                    });
                }

                // Redirects may land elsewhere; the final URL is what the
                // page's relative references resolve against.
                let final_url = response.url().clone();
                let html = response.text().await.map_err(|source| ArchiveError::Load {
                    url: url.to_string(),
                    source,
                })?;

                Ok(LoadedPage::new(final_url, html))
            };

            match tokio::time::timeout(self.load_timeout, load).await {
                Ok(result) => result,
                Err(_) => Err(ArchiveError::LoadTimeout {
                    url: url.to_string(),
                }),
            }
        })
    }
}

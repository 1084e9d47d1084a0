use std::sync::Arc;

use futures::future::BoxFuture;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use url::Url;

use crate::encode::canonical;
use crate::error::ArchiveError;
use crate::filter::{accept_links, FilterDecision, FilterPrompt};
use crate::loader::{LoadedPage, PageLoader};
use crate::resolver::rewrite_assets;
use crate::session::CrawlSession;
use crate::store::FileStore;

/// What one archive operation produced.
#[derive(Debug, Clone, Copy)]
pub struct CrawlOutcome {
    /// Pages archived, the root included.
    pub pages: usize,
    /// True when the filter gate was declined; only the root was archived.
    pub cancelled: bool,
}

/// The recursive crawl driver. Visits a page, archives its rewritten
/// HTML, gates the discovered links through the session filter and fans
/// out concurrently into the accepted, not-yet-visited ones.
pub struct Crawler<L, P> {
    loader: Arc<L>,
    prompt: Arc<P>,
    store: FileStore,
    session: Arc<CrawlSession>,
    semaphore: Arc<Semaphore>,
    progress: ProgressBar,
}

impl<L, P> Crawler<L, P>
where
    L: PageLoader + 'static,
    P: FilterPrompt + 'static,
{
    pub fn new(
        loader: L,
        prompt: P,
        store: FileStore,
        session: Arc<CrawlSession>,
        max_concurrent: usize,
    ) -> Self {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap(),
        );

        Self {
            loader: Arc::new(loader),
            prompt: Arc::new(prompt),
            store,
            session,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            progress,
        }
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    /// Archives the root page and everything reachable through the
    /// filter. Only root-level problems are fatal; failures further down
    /// cost their own subtree and nothing else.
    pub async fn crawl(&self, root: &Url) -> Result<CrawlOutcome, ArchiveError> {
        if root.scheme() != "http" && root.scheme() != "https" {
            return Err(ArchiveError::UnsupportedTarget(root.to_string()));
        }

        let page = {
            let _permit = self.semaphore.acquire().await.expect("load semaphore closed");
            self.loader.open(root).await?
        };

        let pages = self.archive_page(page).await;
        self.progress.finish_and_clear();

        Ok(CrawlOutcome {
            pages,
            cancelled: self.session.is_cancelled(),
        })
    }

    /// One recursive visit. The page context is owned by this branch and
    /// dropped only after the whole subtree below it has joined.
    fn archive_page(&self, page: LoadedPage) -> BoxFuture<'_, usize> {
        Box::pin(async move {
            // Marking visited before any fan-out is what makes cyclic
            // link graphs terminate: a branch that loses this race
            // contributes nothing.
            let canonical_url = canonical(page.url().as_str()).to_string();
            if !self.session.mark_visited(&canonical_url) {
                return 0;
            }

            self.progress.set_message(format!("Archiving: {}", page.url()));

            let snapshot = match page.snapshot() {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    eprintln!("Skipping {}: {}", page.url(), e);
                    return 0;
                }
            };

            let html = rewrite_assets(&snapshot.html, &snapshot.asset_urls, &self.session);
            if let Err(e) = self.store.save_page(page.url(), &html) {
                // One unsaved page must not abort the crawl.
                eprintln!("Failed to save {}: {:#}", page.url(), e);
            }

            let filter = match self.session.filter() {
                Some(filter) => filter,
                None => match self.resolve_filter(&snapshot.hyperlink_urls).await {
                    FilterDecision::Resolved(filter) => {
                        self.session.set_filter(&filter);
                        filter
                    }
                    FilterDecision::Cancelled => {
                        self.session.cancel();
                        return 1;
                    }
                },
            };

            let accepted: Vec<Url> = accept_links(&snapshot.hyperlink_urls, &filter)
                .into_iter()
                .filter(|link| !self.session.is_visited(canonical(link)))
                .filter_map(|link| Url::parse(link).ok())
                .collect();

            let children = accepted.iter().map(|link| async move {
                // The permit covers only the load, not the subtree, so
                // deep recursion cannot exhaust the pool.
                let opened = {
                    let _permit = self.semaphore.acquire().await.expect("load semaphore closed");
                    self.loader.open(link).await
                };

                match opened {
                    Ok(child) => self.archive_page(child).await,
                    Err(e) => {
                        eprintln!("Skipping {}: {}", link, e);
                        0
                    }
                }
            });

            let child_counts = futures::future::join_all(children).await;
            1 + child_counts.into_iter().sum::<usize>()
        })
    }

    /// Runs the one-time interactive gate on the blocking pool.
    async fn resolve_filter(&self, candidates: &[String]) -> FilterDecision {
        self.progress.set_message("Waiting for link filter...");
        let prompt = Arc::clone(&self.prompt);
        let candidates = candidates.to_vec();

        match tokio::task::spawn_blocking(move || prompt.resolve_filter(&candidates)).await {
            Ok(decision) => decision,
            Err(_) => FilterDecision::Cancelled,
        }
    }
}

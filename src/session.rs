use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Mutable state threaded through one archive operation.
///
/// `visited` and `dependencies` are the only collections shared across
/// concurrent crawl branches; every mutation happens inside a short lock
/// section that is never held across an await point.
pub struct CrawlSession {
    visited: Mutex<HashSet<String>>,
    dependencies: Mutex<DependencySet>,
    filter: Mutex<Option<String>>,
    cancelled: AtomicBool,
}

/// Insertion-ordered, deduplicated collection of asset URLs.
#[derive(Default)]
struct DependencySet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self {
            visited: Mutex::new(HashSet::new()),
            dependencies: Mutex::new(DependencySet::default()),
            filter: Mutex::new(None),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Atomically tests and marks a canonical URL as visited.
    ///
    /// Returns `true` when the URL was not yet visited; the caller that
    /// receives `false` lost the race and must not process the page.
    pub fn mark_visited(&self, canonical_url: &str) -> bool {
        let mut visited = self.visited.lock().unwrap();
        visited.insert(canonical_url.to_string())
    }

    pub fn is_visited(&self, canonical_url: &str) -> bool {
        self.visited.lock().unwrap().contains(canonical_url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.lock().unwrap().len()
    }

    /// Records an asset URL, keeping the first-insertion order.
    /// Returns `true` when the URL was newly added.
    pub fn add_dependency(&self, url: &str) -> bool {
        let mut deps = self.dependencies.lock().unwrap();
        if deps.seen.insert(url.to_string()) {
            deps.order.push(url.to_string());
            true
        } else {
            false
        }
    }

    pub fn has_dependency(&self, url: &str) -> bool {
        self.dependencies.lock().unwrap().seen.contains(url)
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.lock().unwrap().order.len()
    }

    /// Snapshot of the accumulated asset URLs, in discovery order.
    pub fn dependencies(&self) -> Vec<String> {
        self.dependencies.lock().unwrap().order.clone()
    }

    pub fn filter(&self) -> Option<String> {
        self.filter.lock().unwrap().clone()
    }

    /// Resolves the session filter. The filter is set-once: a second call
    /// is ignored so the value stays immutable for every recursive branch.
    pub fn set_filter(&self, filter: &str) {
        let mut current = self.filter.lock().unwrap();
        if current.is_none() {
            *current = Some(filter.to_lowercase());
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CrawlSession {
    fn default() -> Self {
        Self::new()
    }
}

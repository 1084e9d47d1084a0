pub mod cli;
pub mod crawler;
pub mod encode;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod loader;
pub mod notify;
pub mod page;
pub mod resolver;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use cli::ArchiveCommand;
pub use crawler::{CrawlOutcome, Crawler};
pub use error::ArchiveError;
pub use fetcher::AssetFetcher;
pub use filter::{FilterDecision, FilterPrompt};
pub use loader::{HttpLoader, LoadedPage, PageLoader};
pub use notify::{ConsoleNotifier, Notify};
pub use page::PageSnapshot;
pub use session::CrawlSession;
pub use store::FileStore;

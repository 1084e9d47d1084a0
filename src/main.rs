use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use url::Url;

use offlinify::filter::ConsolePrompt;
use offlinify::{
    ArchiveCommand, AssetFetcher, ConsoleNotifier, CrawlSession, Crawler, FileStore, HttpLoader,
    Notify,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ArchiveCommand::parse();
    let notifier = ConsoleNotifier;

    match run(&args, &notifier).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            notifier.notify("Offlinifying", &format!("{:#}", e).red().to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &ArchiveCommand, notifier: &dyn Notify) -> Result<()> {
    let root =
        Url::parse(&args.url).with_context(|| format!("Failed to parse URL: {}", args.url))?;
    let timeout = Duration::from_secs(args.timeout);

    notifier.notify("Offlinifying", &format!("Archiving {}", root));

    let store = FileStore::new(&args.output_dir)?;
    let session = Arc::new(CrawlSession::new());
    if let Some(filter) = &args.filter {
        session.set_filter(filter);
    }

    let loader = HttpLoader::new(timeout)?;
    let crawler = Crawler::new(
        loader,
        ConsolePrompt::new(),
        store.clone(),
        Arc::clone(&session),
        args.max_concurrent,
    );

    let outcome = crawler.crawl(&root).await?;

    // Assets are fetched in one deferred pass over the whole session's
    // accumulated collection, after the page crawl has settled.
    let dependencies = session.dependencies();
    let fetcher = AssetFetcher::new(args.max_concurrent, timeout)?;
    let fetched = fetcher.fetch_all(&dependencies, &store).await;

    println!(
        "{} {} pages, {} dependencies discovered, {} assets saved to {:?}",
        "Archived:".green().bold(),
        outcome.pages,
        dependencies.len(),
        fetched,
        store.base_dir()
    );

    if outcome.cancelled {
        notifier.notify("Offlinifying", "Cancelled (no filter selected)");
    } else {
        notifier.notify(
            "Offlinifying",
            &format!(
                "Done: {} pages, {} dependencies",
                outcome.pages,
                dependencies.len()
            ),
        );
    }

    Ok(())
}

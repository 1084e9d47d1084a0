use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "offlinify",
    about = "Recursively archives a website for offline browsing",
    version,
    long_about = "Archives the given page and every reachable page whose URL matches a \
user-chosen substring filter. Saves each page's HTML with asset references rewritten to a \
local assets folder, then downloads the collected assets in one batch."
)]
pub struct ArchiveCommand {
    /// The URL of the page to start archiving from
    #[arg(required = true)]
    pub url: String,

    /// Output directory for the archived site
    #[arg(short, long, default_value = "./offlinified")]
    pub output_dir: PathBuf,

    /// Substring filter for links to follow; when omitted, the discovered
    /// links are listed and the filter is asked for interactively
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Maximum concurrent page loads and asset downloads
    #[arg(short = 'c', long, default_value = "8")]
    pub max_concurrent: usize,

    /// Seconds to wait for a page to finish loading
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

use anyhow::Result;
use select::document::Document;
use select::predicate::{Attr, Name};
use serde::{Deserialize, Serialize};
use url::Url;

/// Tags whose `src` attribute references a static asset.
const SRC_ASSET_TAGS: [&str; 8] = [
    "script", "img", "video", "audio", "source", "track", "iframe", "frame",
];

/// The extracted, plain-data representation of one loaded page: its
/// absolutized markup, the static assets it references and the outbound
/// hyperlinks it exposes. Produced once per visit and consumed immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub html: String,
    pub asset_urls: Vec<String>,
    pub hyperlink_urls: Vec<String>,
}

/// Extracts a [`PageSnapshot`] from raw markup, resolving attribute values
/// against the page's final URL.
pub fn extract_snapshot(html: &str, base_url: &Url) -> Result<PageSnapshot> {
    let document = Document::from(html);

    let mut asset_urls = OrderedSet::new();

    // Every <link href>, stylesheet or otherwise, counts as an asset.
    for link in document.find(Name("link")) {
        if let Some(href) = link.attr("href") {
            if let Some(absolute) = resolve_http(base_url, href) {
                asset_urls.insert(absolute);
            }
        }
    }

    for tag in SRC_ASSET_TAGS {
        for element in document.find(Name(tag)) {
            if let Some(src) = element.attr("src") {
                if let Some(absolute) = resolve_http(base_url, src) {
                    asset_urls.insert(absolute);
                }
            }
        }
    }

    let mut hyperlink_urls = OrderedSet::new();
    for anchor in document.find(Name("a")) {
        if let Some(href) = anchor.attr("href") {
            if let Some(absolute) = resolve_http(base_url, href) {
                hyperlink_urls.insert(absolute);
            }
        }
    }

    let html = absolutize_html(html, &document, base_url);

    Ok(PageSnapshot {
        html,
        asset_urls: asset_urls.into_vec(),
        hyperlink_urls: hyperlink_urls.into_vec(),
    })
}

/// Rewrites every relative `href`/`src` attribute value in the markup to
/// its absolute form, resolved against the page URL. The rewrite is a
/// textual attribute replacement; values that already carry an `http:`,
/// `https:`, `data:` or `javascript:` scheme are left untouched.
fn absolutize_html(html: &str, document: &Document, base_url: &Url) -> String {
    let mut absolutized = html.to_string();

    for attr_name in ["href", "src"] {
        let mut rewritten: Vec<&str> = Vec::new();

        for element in document.find(Attr(attr_name, ())) {
            let Some(raw) = element.attr(attr_name) else {
                continue;
            };
            if raw.is_empty() || is_absolute_or_inline(raw) || rewritten.contains(&raw) {
                continue;
            }
            if let Ok(absolute) = base_url.join(raw) {
                absolutized = absolutized.replace(
                    &format!("{}=\"{}\"", attr_name, raw),
                    &format!("{}=\"{}\"", attr_name, absolute),
                );
                rewritten.push(raw);
            }
        }
    }

    absolutized
}

fn is_absolute_or_inline(value: &str) -> bool {
    value.starts_with("http:")
        || value.starts_with("https:")
        || value.starts_with("data:")
        || value.starts_with("javascript:")
}

/// Resolves a raw attribute value against the base URL, keeping only
/// http(s) results.
fn resolve_http(base_url: &Url, raw: &str) -> Option<String> {
    let resolved = base_url.join(raw).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

/// A deduplicating collection that preserves first-insertion order.
struct OrderedSet {
    items: Vec<String>,
}

impl OrderedSet {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn insert(&mut self, item: String) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

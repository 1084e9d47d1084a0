use crate::encode::encode;
use crate::session::CrawlSession;

/// Rewrites asset references in a page's HTML to local `assets/` paths and
/// records every asset URL in the session's shared dependency collection.
///
/// Replacement is a literal substring substitution, applied in slice
/// order. When one asset URL is a substring of another the earlier entry
/// wins inside the overlap; that lossiness is accepted and pinned by the
/// tests rather than worked around.
pub fn rewrite_assets(html: &str, asset_urls: &[String], session: &CrawlSession) -> String {
    let mut rewritten = html.to_string();

    for url in asset_urls {
        let local = format!("assets/{}", encode(url));
        rewritten = rewritten.replace(url.as_str(), &local);
        session.add_dependency(url);
    }

    rewritten
}

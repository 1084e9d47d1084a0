/// Encodes a URL into a filesystem-safe local file name.
///
/// Strips a leading `http://` or `https://`, replaces every character
/// outside `[A-Za-z0-9.]` with `_` and lowercases the result. Total and
/// deterministic; distinct URLs may collide (the mapping is lossy) and
/// colliding files are overwritten last-write-wins.
pub fn encode(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    stripped
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns the canonical form of a URL: everything before the first `?`.
///
/// Two URLs differing only in their query string are the same node for
/// visited tracking, while the full URL is still used for filtering and
/// fetching.
pub fn canonical(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

use std::collections::BTreeMap;

use console::style;
use dialoguer::Input;
use url::Url;

/// Outcome of the one-time filter request. Terminal either way: a session
/// either crawls with the resolved substring or archives only its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    Resolved(String),
    Cancelled,
}

/// User prompt surface for the link filter, invoked at most once per
/// session with the root page's discovered hyperlinks.
pub trait FilterPrompt: Send + Sync {
    fn resolve_filter(&self, candidates: &[String]) -> FilterDecision;
}

/// Terminal implementation: lists the candidate links grouped by host,
/// then reads a single substring. Empty input cancels the recursion.
pub struct ConsolePrompt {
    /// Links shown per host before the remainder is elided.
    links_per_host: usize,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self { links_per_host: 8 }
    }

    fn print_grouped(&self, candidates: &[String]) {
        let mut hosts: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for candidate in candidates {
            let (host, rest) = match Url::parse(candidate) {
                Ok(url) => {
                    let host = url.host_str().unwrap_or("(no host)").to_string();
                    let mut rest = url.path().to_string();
                    if let Some(query) = url.query() {
                        rest.push('?');
                        rest.push_str(query);
                    }
                    (host, rest)
                }
                Err(_) => ("(unparseable)".to_string(), candidate.clone()),
            };
            hosts.entry(host).or_default().push(rest);
        }

        println!();
        println!(
            "{} {} links on {} hosts:",
            style("Discovered").bold(),
            candidates.len(),
            hosts.len()
        );
        for (host, paths) in &hosts {
            println!("  {}", style(host).cyan().bold());
            for path in paths.iter().take(self.links_per_host) {
                println!("    {}", path);
            }
            if paths.len() > self.links_per_host {
                println!(
                    "    {}",
                    style(format!("... and {} more", paths.len() - self.links_per_host)).dim()
                );
            }
        }
        println!();
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPrompt for ConsolePrompt {
    fn resolve_filter(&self, candidates: &[String]) -> FilterDecision {
        self.print_grouped(candidates);

        let input: Result<String, _> = Input::new()
            .with_prompt("Substring filter for links to follow (empty cancels)")
            .allow_empty(true)
            .interact_text();

        match input {
            Ok(value) => {
                let trimmed = value.trim().to_lowercase();
                if trimmed.is_empty() {
                    FilterDecision::Cancelled
                } else {
                    FilterDecision::Resolved(trimmed)
                }
            }
            // A broken terminal is indistinguishable from declining.
            Err(_) => FilterDecision::Cancelled,
        }
    }
}

/// Applies a resolved filter to a candidate list: case-insensitive
/// substring match over the full URL (query string included).
pub fn accept_links<'a>(candidates: &'a [String], filter: &str) -> Vec<&'a String> {
    let filter = filter.to_lowercase();
    candidates
        .iter()
        .filter(|link| link.to_lowercase().contains(&filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        vec![
            "https://example.com/a".to_string(),
            "https://example.com/b?x=1".to_string(),
            "https://other.com/c".to_string(),
        ]
    }

    #[test]
    fn test_accept_links_is_case_insensitive() {
        let links = candidates();
        let accepted = accept_links(&links, "EXAMPLE.com");
        assert_eq!(
            accepted,
            vec!["https://example.com/a", "https://example.com/b?x=1"]
        );
    }

    #[test]
    fn test_accept_links_matches_query_strings() {
        let links = candidates();
        let accepted = accept_links(&links, "x=1");
        assert_eq!(accepted, vec!["https://example.com/b?x=1"]);
    }

    #[test]
    fn test_accept_links_is_idempotent() {
        let links = candidates();
        let first: Vec<String> = accept_links(&links, "example.com")
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<String> = accept_links(&links, "example.com")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_accept_links_empty_on_no_match() {
        let links = candidates();
        assert!(accept_links(&links, "nowhere.invalid").is_empty());
    }
}

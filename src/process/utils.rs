use url::Url;

/// Split a comma-separated list and trim every item. Empty items are kept so
/// positional pairing with a parallel list still lines up.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Newline-separated bullet list → items, skipping blank lines and removing a
/// leading `"- "` marker.
pub fn bullet_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.strip_prefix("- ").unwrap_or(l).to_string())
        .collect()
}

/// Host part of `url` without a leading `www.`. Falls back to the input when
/// it is not a parseable absolute URL.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => url.to_string(),
    }
}

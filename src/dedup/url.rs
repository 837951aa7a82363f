// URL normalization for exact-duplicate detection.
//
// Two URLs that differ only by scheme, default port, userinfo, a leading
// "www.", a trailing slash, a query string, a fragment or letter case map to
// the same key. Strings that don't parse as absolute URLs fall back to plain
// string trimming.

use url::Url;

/// Normalize a URL into a comparison key.
///
/// `https://www.Example.com:443/a/?utm=x#top` -> `example.com/a`
pub fn normalize_url(raw: &str) -> String {
    match parsed_host(raw) {
        Some((url, host)) => {
            let mut key = host;
            if let Some(port) = url.port() {
                key.push_str(&format!(":{port}"));
            }
            key.push_str(&url.path().to_lowercase());
            key.trim_end_matches('/').to_string()
        }
        None => fallback_key(raw),
    }
}

/// The host part of a URL, without "www." and lowercased.
/// Returns `None` for empty input.
pub fn url_domain(raw: &str) -> Option<String> {
    let host = match parsed_host(raw) {
        Some((_, host)) => host,
        None => {
            let key = fallback_key(raw);
            let first = key.split('/').next().unwrap_or_default();
            first.rsplit('@').next().unwrap_or_default().to_string()
        }
    };
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Parse an absolute URL with a host; returns the normalized host alongside.
fn parsed_host(raw: &str) -> Option<(Url, String)> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    Some((url, host))
}

/// String-only key for inputs like "example.com/a" that have no scheme.
fn fallback_key(raw: &str) -> String {
    let mut key = raw.trim().to_lowercase();
    if let Some(rest) = key.strip_prefix("www.") {
        key = rest.to_string();
    }
    if let Some(pos) = key.find(['?', '#']) {
        key.truncate(pos);
    }
    key.trim_end_matches('/').to_string()
}

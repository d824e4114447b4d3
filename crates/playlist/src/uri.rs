//! URL helpers.

use url::Url;

/// Canonical form of a stream URL.
///
/// Absolute URLs are re-serialised (lowercase scheme and host, escaped
/// spaces); anything else is only trimmed. Applying it twice is a no-op.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    match Url::parse(trimmed) {
        Ok(url) => url.into(),
        Err(_) => trimmed.to_owned(),
    }
}

/// Whether `input` is an absolute URL with a host. `file:` URLs need none.
pub fn is_uri(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) if url.scheme() == "file" => true,
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

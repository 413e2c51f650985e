//! Destination normalization.
//!
//! Destinations are stored as submitted apart from surrounding whitespace and
//! a missing scheme. No other validation is applied.

const SECURE_SCHEME_PREFIX: &str = "https://";

/// Returns true if `url` starts with `http://` or `https://`, ignoring case.
fn has_http_scheme(url: &str) -> bool {
    let lower = |n: usize| url.get(..n).map(|p| p.to_ascii_lowercase());

    lower(7).as_deref() == Some("http://") || lower(8).as_deref() == Some("https://")
}

/// Normalizes a destination so redirects never target a scheme-relative or
/// scheme-less address.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is removed
/// 2. `http://` and `https://` URLs are returned unchanged
/// 3. Scheme-relative URLs (`//host/path`) get `https:`
/// 4. Anything else gets `https://` prepended
///
/// Normalizing twice gives the same result as normalizing once.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_destination("example.com"), "https://example.com");
/// assert_eq!(normalize_destination("//cdn.example.com/a"), "https://cdn.example.com/a");
/// assert_eq!(normalize_destination("http://example.com"), "http://example.com");
/// ```
pub fn normalize_destination(raw: &str) -> String {
    let trimmed = raw.trim();

    if has_http_scheme(trimmed) {
        return trimmed.to_string();
    }

    let without_slashes = trimmed.strip_prefix("//").unwrap_or(trimmed);
    format!("{SECURE_SCHEME_PREFIX}{without_slashes}")
}

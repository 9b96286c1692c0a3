use crate::UrlError;
use ::url::Url;

/// Validates a client-supplied audit URL
///
/// # Validation Steps
///
/// 1. Trim surrounding whitespace; reject if nothing is left
/// 2. Require an `http://` or `https://` prefix (case-insensitive)
/// 3. Parse the URL; reject if malformed
/// 4. Require a host
///
/// No network access happens here, so a rejected URL never reaches a provider.
///
/// # Examples
///
/// ```
/// use seo_audit::url::validate_audit_url;
///
/// let url = validate_audit_url("https://example.com/pricing").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_audit_url("example.com").is_err());
/// ```
pub fn validate_audit_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    // Checked before parsing so that "example.com:8080" is not read as a scheme
    if !has_http_prefix(trimmed) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS URLs can be audited, got: {}",
            trimmed
        )));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

fn has_http_prefix(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

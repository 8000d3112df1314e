//! Link resolution for extracted article URLs.
//!
//! Extracted links come in every shape: absolute, root-relative, bare domains.
//! [`UrlNormalizer`] resolves them against the blog origin on a best-effort basis;
//! [`origin_of`] derives that origin from the configured page URL.

use url::Url;

/// Errors that can occur while deriving a base origin.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

const REJECTED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "ftp:"];

/// Resolves relative and partial links against a base origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlNormalizer {
    base_url: String,
}

impl UrlNormalizer {
    /// Creates a normalizer for `base_url` (`scheme://host[:port]`, trailing slash dropped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `url` to an absolute link where possible.
    ///
    /// # Rules
    ///
    /// 1. Already absolute (`http…`) - returned unchanged
    /// 2. Root-relative (`/…`) - prefixed with the base origin
    /// 3. Bare domain (contains a dot, not `//…`) - prefixed with `https://`
    /// 4. Anything else - returned trimmed, possibly still unresolved
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let normalizer = UrlNormalizer::new("https://blog.example.com");
    /// assert_eq!(normalizer.normalize("/posts/1"), "https://blog.example.com/posts/1");
    /// assert_eq!(normalizer.normalize("example.org/a"), "https://example.org/a");
    /// ```
    pub fn normalize(&self, url: &str) -> String {
        let trimmed = url.trim();

        if trimmed.is_empty() || trimmed.starts_with("http") {
            return trimmed.to_string();
        }

        if trimmed.starts_with('/') {
            return format!("{}{}", self.base_url, trimmed);
        }

        if trimmed.contains('.') && !trimmed.starts_with("//") {
            return format!("https://{trimmed}");
        }

        trimmed.to_string()
    }

    /// Rejects empty links, fragment-only links and non-web schemes.
    pub fn is_valid(&self, url: &str) -> bool {
        let trimmed = url.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }

        let lower = trimmed.to_ascii_lowercase();
        !REJECTED_SCHEMES
            .iter()
            .any(|scheme| lower.starts_with(scheme))
    }
}

/// Returns `scheme://host[:port]` of an HTTP(S) page URL.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn origin_of(page_url: &str) -> Result<String, UrlNormalizationError> {
    let url = Url::parse(page_url.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    Ok(url.origin().ascii_serialization())
}

use url::Url;

use crate::error::{FaviconError, FaviconResult};

/// A normalized resolution target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// The page to scan.
    pub url: Url,
    /// `scheme://host[:port]` with no trailing slash.
    pub origin: String,
    pub host: String,
}

impl Target {
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// `{origin}/favicon.ico`
    pub fn favicon_url(&self) -> String {
        format!("{}/favicon.ico", self.origin)
    }
}

/// Normalize user input into a [`Target`].
///
/// Strips a leading `@` (pasted mentions), and prefixes `https://` when no
/// `http`/`https` scheme is present.
pub fn normalize_target(raw: &str) -> FaviconResult<Target> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let invalid = |reason: String| FaviconError::InvalidUrl {
        input: raw.to_string(),
        reason,
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid("URL has no host".into()))?
        .to_string();
    let origin = url.origin().ascii_serialization();

    Ok(Target { url, origin, host })
}

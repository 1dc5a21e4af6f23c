use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Desktop browser user agent; some sites refuse obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Placeholder replaced by the target hostname in fallback templates.
pub const HOST_PLACEHOLDER: &str = "{host}";

/// A public favicon-by-domain service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackService {
    /// Short name used in logs and stage reports.
    pub name: String,
    /// URL with a `{host}` placeholder.
    pub url_template: String,
}

impl FallbackService {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    pub fn google() -> Self {
        Self::new(
            "google-favicons",
            "https://www.google.com/s2/favicons?sz=64&domain={host}",
        )
    }

    pub fn github() -> Self {
        Self::new("github-favicons", "https://favicons.githubusercontent.com/{host}")
    }

    /// The service URL for `host`.
    pub fn url_for(&self, host: &str) -> String {
        self.url_template.replace(HOST_PLACEHOLDER, host)
    }
}

/// Configuration for the favicon resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Timeout for each existence check (direct probe and fallbacks).
    pub probe_timeout_secs: u64,
    /// Timeout for fetching the target page.
    pub page_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Tried in order, each only while no candidate has been found.
    pub fallbacks: Vec<FallbackService>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 5,
            page_timeout_secs: 10,
            user_agent: BROWSER_USER_AGENT.into(),
            fallbacks: vec![FallbackService::google(), FallbackService::github()],
        }
    }
}

impl ResolverConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ResolverConfig;
use crate::html::IconScanner;
use crate::target::Target;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// When a stage is allowed to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Always runs.
    Primary,
    /// Runs only while no candidate has been found.
    Fallback,
}

// ---------------------------------------------------------------------------
// StageReport
// ---------------------------------------------------------------------------

/// Recorded outcome of one stage in a resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    pub stage_name: String,
    pub tier: Tier,
    /// `true` when a fallback stage was not run because candidates existed.
    pub skipped: bool,
    /// New candidates this stage contributed after deduplication.
    pub added: usize,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// StageContext
// ---------------------------------------------------------------------------

/// Everything a stage can use while discovering candidates.
pub struct StageContext<'a> {
    pub target: &'a Target,
    pub client: &'a reqwest::Client,
    pub config: &'a ResolverConfig,
    pub scanner: &'a IconScanner,
}

impl StageContext<'_> {
    /// `HEAD url` bounded by the probe timeout; any status below 400 is a hit.
    pub async fn exists(&self, url: &str) -> Result<bool, reqwest::Error> {
        let response = self
            .client
            .head(url)
            .timeout(self.config.probe_timeout())
            .send()
            .await?;
        Ok(response.status().as_u16() < 400)
    }

    /// Fetch the target page body bounded by the page timeout.
    ///
    /// Non-success statuses are errors.
    pub async fn fetch_page(&self) -> Result<String, reqwest::Error> {
        self.client
            .get(self.target.url.clone())
            .timeout(self.config.page_timeout())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

// ---------------------------------------------------------------------------
// DiscoveryStage trait
// ---------------------------------------------------------------------------

/// A single strategy in the resolution pipeline.
///
/// Stages run in order. A stage never fails the resolution: network errors
/// are logged and reported as `None`.
#[async_trait]
pub trait DiscoveryStage: Send + Sync {
    /// Human-readable name of this stage (e.g. "direct-probe").
    fn name(&self) -> &str;

    fn tier(&self) -> Tier;

    /// Candidate URLs found by this stage, or `None` if it produced nothing.
    async fn discover(&self, ctx: &StageContext<'_>) -> Option<Vec<String>>;
}

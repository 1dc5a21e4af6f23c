use std::time::{Duration, Instant};

use tracing::info;

use crate::config::ResolverConfig;
use crate::error::{FaviconError, FaviconResult};
use crate::html::IconScanner;
use crate::stage::{DiscoveryStage, StageContext, StageReport, Tier};
use crate::stages::{DirectProbeStage, FallbackStage, HtmlScanStage};
use crate::target::normalize_target;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving one URL.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Candidate icon URLs in order of first discovery.
    pub candidates: Vec<String>,
    /// Per-stage results in pipeline order.
    pub stages: Vec<StageReport>,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// FaviconResolver
// ---------------------------------------------------------------------------

/// Runs the discovery pipeline for a URL.
///
/// Stages run sequentially. Every [`Tier::Primary`] stage runs; a
/// [`Tier::Fallback`] stage runs only while the candidate list is empty.
/// Candidates are deduplicated, keeping the position of first discovery.
pub struct FaviconResolver {
    client: reqwest::Client,
    config: ResolverConfig,
    scanner: IconScanner,
    stages: Vec<Box<dyn DiscoveryStage>>,
}

impl FaviconResolver {
    /// Create a resolver with an empty pipeline.
    ///
    /// Use [`Self::add_stage`] to add stages, or
    /// [`Self::with_default_stages`] for the standard pipeline.
    pub fn new(config: ResolverConfig) -> FaviconResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FaviconError::Client(e.to_string()))?;
        Ok(Self {
            client,
            config,
            scanner: IconScanner::new()?,
            stages: Vec::new(),
        })
    }

    /// Create a resolver with the standard pipeline:
    /// direct probe -> HTML scan -> each configured fallback service.
    pub fn with_default_stages(config: ResolverConfig) -> FaviconResult<Self> {
        let fallbacks = config.fallbacks.clone();
        let mut resolver = Self::new(config)?;
        resolver.add_stage(Box::new(DirectProbeStage));
        resolver.add_stage(Box::new(HtmlScanStage));
        for service in fallbacks {
            resolver.add_stage(Box::new(FallbackStage::new(service)));
        }
        Ok(resolver)
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage(&mut self, stage: Box<dyn DiscoveryStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Candidate icon URLs for `raw_url`.
    ///
    /// Fails only when the URL cannot be parsed; an empty list means every
    /// stage came up empty.
    pub async fn resolve(&self, raw_url: &str) -> FaviconResult<Vec<String>> {
        Ok(self.resolve_with_report(raw_url).await?.candidates)
    }

    /// Like [`Self::resolve`], with per-stage results.
    pub async fn resolve_with_report(&self, raw_url: &str) -> FaviconResult<Resolution> {
        let started = Instant::now();
        let target = normalize_target(raw_url)?;
        let ctx = StageContext {
            target: &target,
            client: &self.client,
            config: &self.config,
            scanner: &self.scanner,
        };

        let mut candidates: Vec<String> = Vec::new();
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            if stage.tier() == Tier::Fallback && !candidates.is_empty() {
                reports.push(StageReport {
                    stage_name: stage.name().to_string(),
                    tier: Tier::Fallback,
                    skipped: true,
                    added: 0,
                    elapsed: Duration::ZERO,
                });
                continue;
            }

            let stage_start = Instant::now();
            let found = stage.discover(&ctx).await.unwrap_or_default();
            let before = candidates.len();
            for url in found {
                if !candidates.contains(&url) {
                    candidates.push(url);
                }
            }

            reports.push(StageReport {
                stage_name: stage.name().to_string(),
                tier: stage.tier(),
                skipped: false,
                added: candidates.len() - before,
                elapsed: stage_start.elapsed(),
            });
        }

        info!(url = %target.url, count = candidates.len(), "favicon resolution finished");
        Ok(Resolution {
            candidates,
            stages: reports,
            elapsed: started.elapsed(),
        })
    }
}

impl std::fmt::Debug for FaviconResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("FaviconResolver")
            .field("stages", &names)
            .field("config", &self.config)
            .finish()
    }
}

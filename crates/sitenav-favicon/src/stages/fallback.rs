use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::FallbackService;
use crate::stage::{DiscoveryStage, StageContext, Tier};

/// Asks a public favicon-by-domain service whether it has an icon.
pub struct FallbackStage {
    service: FallbackService,
}

impl FallbackStage {
    pub fn new(service: FallbackService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &FallbackService {
        &self.service
    }
}

#[async_trait]
impl DiscoveryStage for FallbackStage {
    fn name(&self) -> &str {
        &self.service.name
    }

    fn tier(&self) -> Tier {
        Tier::Fallback
    }

    async fn discover(&self, ctx: &StageContext<'_>) -> Option<Vec<String>> {
        let url = self.service.url_for(&ctx.target.host);
        match ctx.exists(&url).await {
            Ok(true) => {
                debug!(service = %self.service.name, %url, "fallback icon available");
                Some(vec![url])
            }
            Ok(false) => {
                info!(service = %self.service.name, "fallback service has no icon");
                None
            }
            Err(e) => {
                info!(service = %self.service.name, error = %e, "fallback service unavailable");
                None
            }
        }
    }
}

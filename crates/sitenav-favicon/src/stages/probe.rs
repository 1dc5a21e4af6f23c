use async_trait::async_trait;
use tracing::{debug, info};

use crate::stage::{DiscoveryStage, StageContext, Tier};

/// Checks whether `{origin}/favicon.ico` exists.
pub struct DirectProbeStage;

#[async_trait]
impl DiscoveryStage for DirectProbeStage {
    fn name(&self) -> &str {
        "direct-probe"
    }

    fn tier(&self) -> Tier {
        Tier::Primary
    }

    async fn discover(&self, ctx: &StageContext<'_>) -> Option<Vec<String>> {
        let url = ctx.target.favicon_url();
        match ctx.exists(&url).await {
            Ok(true) => {
                debug!(%url, "favicon.ico found");
                Some(vec![url])
            }
            Ok(false) => {
                info!(%url, "favicon.ico not available");
                None
            }
            Err(e) => {
                info!(%url, error = %e, "favicon.ico probe failed");
                None
            }
        }
    }
}

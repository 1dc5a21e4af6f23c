use async_trait::async_trait;
use tracing::{debug, info};

use crate::stage::{DiscoveryStage, StageContext, Tier};

/// Fetches the target page and scans it for icon declarations.
pub struct HtmlScanStage;

#[async_trait]
impl DiscoveryStage for HtmlScanStage {
    fn name(&self) -> &str {
        "html-scan"
    }

    fn tier(&self) -> Tier {
        Tier::Primary
    }

    async fn discover(&self, ctx: &StageContext<'_>) -> Option<Vec<String>> {
        let html = match ctx.fetch_page().await {
            Ok(html) => html,
            Err(e) => {
                info!(url = %ctx.target.url, error = %e, "could not fetch page");
                return None;
            }
        };

        let found = ctx
            .scanner
            .scan(&html, &ctx.target.origin, ctx.target.scheme());
        if found.is_empty() {
            info!(url = %ctx.target.url, "no icon declarations in page");
            return None;
        }

        debug!(url = %ctx.target.url, count = found.len(), "icon declarations found");
        Some(found)
    }
}

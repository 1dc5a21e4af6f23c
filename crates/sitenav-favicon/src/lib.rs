//! Favicon discovery for sitenav.
//!
//! Given a website URL, [`FaviconResolver`] produces an ordered,
//! deduplicated list of candidate icon URLs by running a fixed pipeline of
//! discovery stages:
//!
//! 1. [`DirectProbeStage`] -- `HEAD {origin}/favicon.ico`
//! 2. [`HtmlScanStage`] -- fetch the page and scan `<link rel=...>` icon
//!    declarations plus `og:image` meta tags
//! 3. [`FallbackStage`] A -- a public favicon-by-domain service
//! 4. [`FallbackStage`] B -- a second public favicon-by-domain service
//!
//! Primary stages always run. Fallback stages run only while no candidate
//! has been found. A stage that fails (timeout, DNS, bad status) contributes
//! nothing and never aborts the resolution; only an unparseable target URL
//! is an error.

pub mod config;
pub mod error;
pub mod html;
pub mod resolver;
pub mod stage;
pub mod stages;
pub mod target;

pub use config::{FallbackService, ResolverConfig};
pub use error::{FaviconError, FaviconResult};
pub use html::{resolve_reference, IconScanner};
pub use resolver::{FaviconResolver, Resolution};
pub use stage::{DiscoveryStage, StageContext, StageReport, Tier};
pub use stages::{DirectProbeStage, FallbackStage, HtmlScanStage};
pub use target::{normalize_target, Target};

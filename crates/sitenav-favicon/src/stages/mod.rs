//! Built-in discovery stages.

pub mod fallback;
pub mod page;
pub mod probe;

pub use fallback::FallbackStage;
pub use page::HtmlScanStage;
pub use probe::DirectProbeStage;

use std::sync::Arc;
use std::time::Instant;

use sitenav_catalog::Catalog;
use sitenav_favicon::FaviconResolver;
use sitenav_store::RecordStore;

use crate::uploads::ImageStore;

/// The catalog type shared by handlers.
pub type SharedCatalog = Catalog<Box<dyn RecordStore>>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<SharedCatalog>,
    pub resolver: Arc<FaviconResolver>,
    pub images: Arc<ImageStore>,
    pub started: Instant,
}

impl AppState {
    pub fn new(store: Box<dyn RecordStore>, resolver: FaviconResolver, images: ImageStore) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(store)),
            resolver: Arc::new(resolver),
            images: Arc::new(images),
            started: Instant::now(),
        }
    }
}

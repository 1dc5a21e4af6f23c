use sitenav_favicon::FaviconResolver;
use sitenav_store::{JsonFileStore, RecordStore};
use sitenav_types::WebsiteSnapshot;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;
use crate::uploads::ImageStore;

/// The sitenav HTTP server.
pub struct SitenavServer {
    config: ServerConfig,
}

impl SitenavServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the data file and build the shared handler state.
    ///
    /// A missing data file is created holding an empty collection.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let store = JsonFileStore::open(&self.config.data_file)?;
        if !store.exists() {
            store.save(&WebsiteSnapshot::default())?;
            info!(path = %store.path().display(), "initialized empty data file");
        }

        let resolver = FaviconResolver::with_default_stages(self.config.favicon.clone())?;
        let images = ImageStore::new(&self.config.images_dir, self.config.max_upload_bytes);
        Ok(AppState::new(Box::new(store), resolver, images))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Start serving requests until ctrl-c or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        tokio::fs::create_dir_all(&self.config.images_dir).await?;
        let app = self.router()?;

        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(
            addr = %self.config.bind_addr,
            data = %self.config.data_file.display(),
            images = %self.config.images_dir.display(),
            "sitenav server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!("sitenav server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

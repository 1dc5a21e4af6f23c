use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Room for the text fields of a multipart form on top of the image limit.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the axum router with every sitenav endpoint.
///
/// Static segments (`reorder`, `import`, `export`) take priority over the
/// `:name` parameter, so those names are not addressable by path.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.images.max_bytes() + FORM_OVERHEAD_BYTES;
    let images = ServeDir::new(state.images.dir());

    Router::new()
        .route(
            "/api/websites",
            get(handler::list_websites).post(handler::create_website),
        )
        .route("/api/websites/reorder", put(handler::reorder_websites))
        .route("/api/websites/import", post(handler::import_websites))
        .route("/api/websites/export", get(handler::export_websites))
        .route(
            "/api/websites/:name",
            put(handler::update_website).delete(handler::delete_website),
        )
        .route("/api/upload", post(handler::upload_image))
        .route("/api/modes", get(handler::list_modes))
        .route("/api/health", get(handler::health))
        .route("/api/getSiteFaviconList", get(handler::site_favicons))
        .nest_service("/images", images)
        .fallback(handler::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use sitenav_catalog::{parse_import, parse_order, validate_name, CatalogResult};
use sitenav_types::AccessMode;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::forms::WebsiteForm;
use crate::state::{AppState, SharedCatalog};

/// Run a catalog operation on the blocking pool.
async fn with_catalog<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SharedCatalog) -> CatalogResult<T> + Send + 'static,
{
    let catalog = Arc::clone(&state.catalog);
    tokio::task::spawn_blocking(move || op(&catalog))
        .await
        .map_err(|e| ApiError::Internal(format!("catalog task failed: {e}")))?
        .map_err(ApiError::from)
}

fn parse_json(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))
}

// ── Collection ──────────────────────────────────────────────────────

pub async fn list_websites(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let websites = with_catalog(&state, |c| Ok(c.list())).await?;
    Ok(Json(json!({
        "success": true,
        "total": websites.len(),
        "data": websites,
    })))
}

pub async fn create_website(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut form = WebsiteForm::from_multipart(multipart).await?;
    validate_name(form.name.as_deref().unwrap_or_default())?;

    let image = match form.image.take() {
        Some(file) => Some(state.images.store(&file).await?.filename),
        None => None,
    };
    let request = form.into_new_website(image.clone());

    let result = with_catalog(&state, move |c| c.create(request)).await;
    if result.is_err() {
        if let Some(filename) = &image {
            state.images.discard(filename).await;
        }
    }
    let record = result?;

    Ok(Json(json!({
        "success": true,
        "data": record,
        "message": "website created",
    })))
}

pub async fn update_website(
    State(state): State<AppState>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut form = WebsiteForm::from_multipart(multipart).await?;

    let image = match form.image.take() {
        Some(file) => Some(state.images.store(&file).await?.filename),
        None => None,
    };
    let update = form.into_update(image.clone());

    let result = with_catalog(&state, move |c| c.update(&name, update)).await;
    if result.is_err() {
        if let Some(filename) = &image {
            state.images.discard(filename).await;
        }
    }
    let record = result?;

    Ok(Json(json!({
        "success": true,
        "data": record,
        "message": "website updated",
    })))
}

pub async fn delete_website(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    let removed = with_catalog(&state, move |c| c.delete(&name)).await?;
    Ok(Json(json!({
        "success": true,
        "data": removed,
        "message": "website deleted",
    })))
}

/// `PUT /api/websites/reorder` with `{"order": [names]}`.
pub async fn reorder_websites(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let order = parse_order(&parse_json(&body)?)?;
    let websites = with_catalog(&state, move |c| c.reorder(&order)).await?;
    Ok(Json(json!({
        "success": true,
        "data": websites,
        "message": "order saved",
    })))
}

/// `POST /api/websites/import` with `{"websites": [records]}`. Replaces the
/// whole collection.
pub async fn import_websites(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let records = parse_import(&parse_json(&body)?)?;
    let count = with_catalog(&state, move |c| c.import(records)).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "websitesCount": count },
        "message": "data imported",
    })))
}

pub async fn export_websites(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let snapshot = with_catalog(&state, |c| c.export()).await?;
    Ok(Json(json!({ "success": true, "data": snapshot })))
}

// ── Uploads ─────────────────────────────────────────────────────────

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let form = WebsiteForm::from_multipart(multipart).await?;
    let file = form
        .image
        .ok_or_else(|| ApiError::Validation("no file uploaded".into()))?;
    let stored = state.images.store(&file).await?;
    Ok(Json(json!({
        "success": true,
        "data": stored,
        "message": "image uploaded",
    })))
}

// ── Service info ────────────────────────────────────────────────────

pub async fn list_modes() -> Json<Value> {
    let modes: Vec<Value> = AccessMode::ALL
        .iter()
        .map(|mode| {
            json!({
                "key": mode.key(),
                "name": mode.label(),
                "description": mode.description(),
            })
        })
        .collect();
    Json(json!({ "success": true, "data": modes }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "service is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.started.elapsed().as_secs_f64(),
    }))
}

// ── Favicon lookup ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FaviconQuery {
    pub url: Option<String>,
}

fn favicon_failure(status: StatusCode, msg: String) -> Response {
    (status, Json(json!({ "code": 1, "data": null, "msg": msg }))).into_response()
}

/// `GET /api/getSiteFaviconList?url=...`
///
/// Answers `{"code": 0, "data": {"count", "list"}, "msg": "OK"}`; failures
/// use `code: 1` with `data: null`.
pub async fn site_favicons(
    State(state): State<AppState>,
    Query(query): Query<FaviconQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return favicon_failure(StatusCode::BAD_REQUEST, "url query parameter is required".into());
    };

    match state.resolver.resolve(&url).await {
        Ok(list) => Json(json!({
            "code": 0,
            "data": { "count": list.len(), "list": list },
            "msg": "OK",
        }))
        .into_response(),
        Err(e) => {
            warn!(url = %url, error = %e, "favicon lookup failed");
            favicon_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to fetch site icons: {e}"),
            )
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("requested resource does not exist".into())
}

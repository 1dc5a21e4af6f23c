#![allow(clippy::unwrap_used)]
// HTTP surface tests driving the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitenav_favicon::{FaviconResolver, ResolverConfig};
use sitenav_server::router::build_router;
use sitenav_server::uploads::ImageStore;
use sitenav_server::AppState;
use sitenav_store::InMemoryRecordStore;
use sitenav_types::{WebsiteRecord, WebsiteSnapshot};

// ── Helpers ─────────────────────────────────────────────────────────

const BOUNDARY: &str = "sitenav-test-boundary";

struct TestApp {
    router: Router,
    store: Arc<InMemoryRecordStore>,
    images: TempDir,
}

impl TestApp {
    fn names(&self) -> Vec<String> {
        self.store_snapshot().websites.into_iter().map(|w| w.name).collect()
    }

    fn store_snapshot(&self) -> WebsiteSnapshot {
        use sitenav_store::RecordStore;
        self.store.load().unwrap()
    }

    fn image_count(&self) -> usize {
        std::fs::read_dir(self.images.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

fn app_with_resolver(names: &[&str], resolver: ResolverConfig) -> TestApp {
    let records = names.iter().map(|n| WebsiteRecord::named(*n)).collect();
    let store = Arc::new(InMemoryRecordStore::with_snapshot(WebsiteSnapshot::new(records)));
    let images = tempfile::tempdir().unwrap();
    let state = AppState::new(
        Box::new(Arc::clone(&store)),
        FaviconResolver::with_default_stages(resolver).unwrap(),
        ImageStore::new(images.path(), 1024),
    );
    TestApp {
        router: build_router(state),
        store,
        images,
    }
}

fn app_with(names: &[&str]) -> TestApp {
    let config = ResolverConfig {
        fallbacks: Vec::new(),
        ..ResolverConfig::default()
    };
    app_with_resolver(names, config)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

struct FilePart<'a> {
    file_name: &'a str,
    content_type: &'a str,
    data: &'a [u8],
}

fn multipart(method: &str, uri: &str, fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn png<'a>() -> FilePart<'a> {
    FilePart {
        file_name: "logo.png",
        content_type: "image/png",
        data: b"\x89PNG fake",
    }
}

// ── Collection ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_websites() {
    let app = app_with(&["A", "B"]);
    let (status, body) = app.send(get("/api/websites")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][1]["name"], "B");
}

#[tokio::test]
async fn test_create_fills_unset_urls() {
    let app = app_with(&["A"]);
    let request = multipart(
        "POST",
        "/api/websites",
        &[("name", "Jellyfin"), ("intranet", "http://192.168.1.10:8096")],
        None,
    );
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["intranet"], "http://192.168.1.10:8096");
    assert_eq!(body["data"]["ipv6"], "#");
    assert_eq!(body["data"]["image"], Value::Null);
    assert!(body["data"]["id"].is_i64());
    assert_eq!(app.names(), vec!["A", "Jellyfin"]);
}

#[tokio::test]
async fn test_create_without_name_is_rejected() {
    let app = app_with(&["A"]);
    let request = multipart("POST", "/api/websites", &[("intranet", "http://x")], Some(png()));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.names(), vec!["A"]);
    assert_eq!(app.image_count(), 0);
}

#[tokio::test]
async fn test_create_with_image_is_served() {
    let app = app_with(&[]);
    let request = multipart("POST", "/api/websites", &[("name", "NAS")], Some(png()));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let filename = body["data"]["image"].as_str().unwrap().to_string();
    assert!(filename.starts_with("image-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(app.image_count(), 1);

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/images/{filename}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG fake");
}

#[tokio::test]
async fn test_create_rejects_non_image() {
    let app = app_with(&[]);
    let file = FilePart {
        file_name: "notes.txt",
        content_type: "text/plain",
        data: b"hello",
    };
    let request = multipart("POST", "/api/websites", &[("name", "NAS")], Some(file));
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.names().is_empty());
    assert_eq!(app.image_count(), 0);
}

#[tokio::test]
async fn test_create_duplicate_discards_image() {
    let app = app_with(&["NAS"]);
    let request = multipart("POST", "/api/websites", &[("name", "NAS")], Some(png()));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
    assert_eq!(app.image_count(), 0);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = app_with(&[]);
    app.send(multipart(
        "POST",
        "/api/websites",
        &[("name", "NAS"), ("intranet", "http://10.0.0.2")],
        None,
    ))
    .await;

    let request = multipart("PUT", "/api/websites/NAS", &[("frp", "https://nas.frp.example")], None);
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["intranet"], "http://10.0.0.2");
    assert_eq!(body["data"]["frp"], "https://nas.frp.example");
}

#[tokio::test]
async fn test_update_renames_with_encoded_path() {
    let app = app_with(&["My NAS", "B"]);
    let request = multipart("PUT", "/api/websites/My%20NAS", &[("name", "Storage")], None);
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.names(), vec!["Storage", "B"]);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let app = app_with(&["A"]);
    let request = multipart("PUT", "/api/websites/ghost", &[("frp", "x")], Some(png()));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(app.image_count(), 0);
}

#[tokio::test]
async fn test_delete_returns_record() {
    let app = app_with(&["A", "B"]);
    let delete = || Request::builder().method("DELETE").uri("/api/websites/A").body(Body::empty()).unwrap();

    let (status, body) = app.send(delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "A");
    assert_eq!(app.names(), vec!["B"]);

    let (status, _) = app.send(delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_keeps_unlisted_records() {
    let app = app_with(&["A", "B", "C"]);
    let request = json_request("PUT", "/api/websites/reorder", json!({ "order": ["C", "A"] }));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert_eq!(app.names(), vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_reorder_rejects_bad_input() {
    let app = app_with(&["A", "B"]);

    let (status, body) = app
        .send(json_request("PUT", "/api/websites/reorder", json!({ "order": "A" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let broken = Request::builder()
        .method("PUT")
        .uri("/api/websites/reorder")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.names(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_import_replaces_collection() {
    let app = app_with(&["A", "B", "C", "D", "E"]);
    let request = json_request(
        "POST",
        "/api/websites/import",
        json!({ "websites": [{ "name": "X", "intranet": "http://x" }] }),
    );
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["websitesCount"], 1);
    assert_eq!(app.names(), vec!["X"]);
}

#[tokio::test]
async fn test_import_rejects_nameless_record() {
    let app = app_with(&["A"]);
    let request = json_request(
        "POST",
        "/api/websites/import",
        json!({ "websites": [{ "name": "X" }, { "intranet": "http://y" }] }),
    );
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.names(), vec!["A"]);
}

#[tokio::test]
async fn test_import_path_has_no_delete() {
    let app = app_with(&["import"]);
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/websites/import")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(app.names(), vec!["import"]);
}

#[tokio::test]
async fn test_export_snapshot() {
    let app = app_with(&["A"]);
    let (status, body) = app.send(get("/api/websites/export")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["websites"][0]["name"], "A");
    assert_eq!(body["data"]["categories"], json!([]));
}

#[tokio::test]
async fn test_write_failure_is_server_error() {
    let app = app_with(&["A"]);
    app.store.set_fail_writes(true);

    let request = json_request("PUT", "/api/websites/reorder", json!({ "order": ["A"] }));
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "failed to save data");
}

// ── Uploads and service info ────────────────────────────────────────

#[tokio::test]
async fn test_upload_image() {
    let app = app_with(&[]);
    let (status, body) = app.send(multipart("POST", "/api/upload", &[], Some(png()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["originalname"], "logo.png");
    assert_eq!(body["data"]["size"], 9);
    let filename = body["data"]["filename"].as_str().unwrap();
    assert_eq!(body["data"]["path"], format!("/images/{filename}"));
}

#[tokio::test]
async fn test_upload_without_file() {
    let app = app_with(&[]);
    let (status, body) = app.send(multipart("POST", "/api/upload", &[("name", "x")], None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_modes_and_health() {
    let app = app_with(&[]);

    let (status, body) = app.send(get("/api/modes")).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["intranet", "ipv6", "frp", "easytier"]);

    let (status, body) = app.send(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app_with(&[]);
    let (status, body) = app.send(get("/api/nothing-here")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

// ── Favicon lookup ──────────────────────────────────────────────────

#[tokio::test]
async fn test_favicon_requires_url() {
    let app = app_with(&[]);
    let (status, body) = app.send(get("/api/getSiteFaviconList")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_favicon_invalid_url() {
    let app = app_with(&[]);
    let (status, body) = app
        .send(get("/api/getSiteFaviconList?url=http%3A%2F%2Fbad%20host"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 1);
}

#[tokio::test]
async fn test_favicon_lists_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<link rel="icon" href="/favicon.ico"><link rel="apple-touch-icon" href="touch.png">"#),
        )
        .mount(&server)
        .await;

    let config = ResolverConfig {
        probe_timeout_secs: 1,
        page_timeout_secs: 2,
        fallbacks: Vec::new(),
        ..ResolverConfig::default()
    };
    let app = app_with_resolver(&[], config);
    let (status, body) = app
        .send(get(&format!("/api/getSiteFaviconList?url={}", server.uri())))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["msg"], "OK");
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(
        body["data"]["list"],
        json!([format!("{}/favicon.ico", server.uri()), format!("{}/touch.png", server.uri())])
    );
}

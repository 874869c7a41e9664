use super::*;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

fn site_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

async fn status_of(router: Router, uri: &str) -> StatusCode {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn healthz_returns_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[tokio::test]
async fn healthz_is_routed() {
    assert_eq!(status_of(base_routes(site_root()), "/healthz").await, StatusCode::OK);
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let status = status_of(base_routes(site_root()), "/pkg/travel-companion.wasm").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn middleware_keeps_routes_reachable() {
    let router = with_middleware(base_routes(site_root()));
    assert_eq!(status_of(router, "/healthz").await, StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_without_leptos_is_not_found() {
    assert_eq!(status_of(base_routes(site_root()), "/nope").await, StatusCode::NOT_FOUND);
}

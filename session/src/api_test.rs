use super::*;
use crate::test_helpers::{ApiFixture, TEST_API_URL};

fn trip_json(id: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "Tokyo Adventure",
        "country": "Japan",
        "city": "Tokyo",
        "start_date": "2024-04-15",
        "end_date": "2024-04-22"
    })
}

fn trip_input() -> TripInput {
    TripInput {
        title: "Tokyo Adventure".into(),
        country: "Japan".into(),
        city: "Tokyo".into(),
        start_date: "2024-04-15".into(),
        end_date: "2024-04-22".into(),
        image_url: None,
    }
}

// =============================================================
// Endpoint helpers
// =============================================================

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(trip_endpoint("7"), "/api/trips/7");
    assert_eq!(trip_destinations_endpoint("7"), "/api/destinations/7");
    assert_eq!(destination_endpoint("9"), "/api/destinations/9");
}

#[test]
fn resolve_base_url_defaults_when_missing_or_blank() {
    assert_eq!(resolve_base_url(None), DEFAULT_API_URL);
    assert_eq!(resolve_base_url(Some("   ")), DEFAULT_API_URL);
}

#[test]
fn resolve_base_url_trims_trailing_slash() {
    assert_eq!(resolve_base_url(Some("https://api.example.com/")), "https://api.example.com");
}

#[test]
fn client_base_url_is_normalized() {
    let fx = ApiFixture::new();
    let client = ApiClient::new("http://api.test/", fx.transport.clone(), fx.tokens.clone(), fx.navigator.clone());
    assert_eq!(client.base_url(), TEST_API_URL);
}

// =============================================================
// Authorization header
// =============================================================

#[tokio::test]
async fn attaches_bearer_when_token_present() {
    let fx = ApiFixture::new();
    fx.tokens.set("tok-1");
    fx.transport.push(200, "[]");
    fx.client().list_trips().await.unwrap();

    let requests = fx.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization().as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn omits_bearer_when_no_token() {
    let fx = ApiFixture::new();
    fx.transport.push(200, "[]");
    fx.client().list_trips().await.unwrap();
    assert_eq!(fx.transport.requests()[0].bearer, None);
}

// =============================================================
// Endpoints
// =============================================================

#[tokio::test]
async fn ensure_user_posts_without_body_and_ignores_response() {
    let fx = ApiFixture::new();
    fx.transport.push(201, "not even json");
    fx.client().ensure_user().await.unwrap();

    let req = &fx.transport.requests()[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "http://api.test/api/users");
    assert_eq!(req.body, None);
}

#[tokio::test]
async fn list_trips_decodes_array() {
    let fx = ApiFixture::new();
    fx.transport.push_json(200, &serde_json::json!([trip_json(1), trip_json(2)]));
    let trips = fx.client().list_trips().await.unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[1].id, "2");
}

#[tokio::test]
async fn get_trip_hits_id_path() {
    let fx = ApiFixture::new();
    fx.transport.push_json(200, &trip_json(5));
    let trip = fx.client().get_trip("5").await.unwrap();
    assert_eq!(trip.title, "Tokyo Adventure");
    assert_eq!(fx.transport.requests()[0].url, "http://api.test/api/trips/5");
}

#[tokio::test]
async fn create_trip_posts_json_body() {
    let fx = ApiFixture::new();
    fx.transport.push_json(201, &trip_json(9));
    let trip = fx.client().create_trip(&trip_input()).await.unwrap();
    assert_eq!(trip.id, "9");

    let req = &fx.transport.requests()[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "http://api.test/api/trips");
    assert_eq!(req.body.as_ref().unwrap()["city"], "Tokyo");
}

#[tokio::test]
async fn update_trip_puts_to_id_path() {
    let fx = ApiFixture::new();
    fx.transport.push_json(200, &trip_json(9));
    fx.client().update_trip("9", &trip_input()).await.unwrap();
    let req = &fx.transport.requests()[0];
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "http://api.test/api/trips/9");
}

#[tokio::test]
async fn delete_trip_ignores_body() {
    let fx = ApiFixture::new();
    fx.transport.push(204, "");
    fx.client().delete_trip("9").await.unwrap();
    assert_eq!(fx.transport.requests()[0].method, Method::Delete);
}

#[tokio::test]
async fn destination_crud_paths() {
    let fx = ApiFixture::new();
    let dest = serde_json::json!({ "id": 3, "trip_id": 9, "name": "Shibuya", "description": "Crossing" });
    fx.transport.push_json(200, &serde_json::json!([dest.clone()]));
    fx.transport.push_json(201, &dest);
    fx.transport.push_json(200, &dest);
    fx.transport.push(204, "");

    let client = fx.client();
    let input = DestinationInput { name: "Shibuya".into(), description: "Crossing".into(), trip_id: "9".into() };
    assert_eq!(client.list_destinations("9").await.unwrap().len(), 1);
    assert_eq!(client.create_destination(&input).await.unwrap().id, "3");
    client.update_destination("3", &input).await.unwrap();
    client.delete_destination("3").await.unwrap();

    let seen: Vec<(Method, String)> = fx
        .transport
        .requests()
        .into_iter()
        .map(|r| (r.method, r.url))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::Get, "http://api.test/api/destinations/9".to_owned()),
            (Method::Post, "http://api.test/api/destinations".to_owned()),
            (Method::Put, "http://api.test/api/destinations/3".to_owned()),
            (Method::Delete, "http://api.test/api/destinations/3".to_owned()),
        ]
    );
}

// =============================================================
// Error handling
// =============================================================

#[tokio::test]
async fn unauthorized_clears_token_and_redirects_once() {
    let fx = ApiFixture::new();
    fx.tokens.set("stale");
    fx.transport.push(401, r#"{"error":"expired"}"#);

    let err = fx.client().list_trips().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(fx.tokens.get(), None);
    assert_eq!(fx.navigator.visits(), vec![LOGIN_PATH.to_owned()]);
}

#[tokio::test]
async fn unauthorized_redirect_applies_to_every_endpoint() {
    let fx = ApiFixture::new();
    let client = fx.client();
    let input = DestinationInput::default();
    for _ in 0..4 {
        fx.transport.push(401, "");
    }

    assert_eq!(client.ensure_user().await, Err(ApiError::Unauthorized));
    assert_eq!(client.delete_trip("1").await, Err(ApiError::Unauthorized));
    assert_eq!(client.create_destination(&input).await, Err(ApiError::Unauthorized));
    assert_eq!(client.get_trip("1").await, Err(ApiError::Unauthorized));
    assert_eq!(fx.navigator.visits().len(), 4);
}

#[tokio::test]
async fn other_statuses_do_not_redirect() {
    let fx = ApiFixture::new();
    fx.tokens.set("tok");
    fx.transport.push(500, "boom");

    let err = fx.client().list_trips().await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 500, body: "boom".into() });
    assert_eq!(fx.tokens.get().as_deref(), Some("tok"));
    assert!(fx.navigator.visits().is_empty());
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let fx = ApiFixture::new();
    fx.transport.push_error("connection refused");
    let err = fx.client().list_trips().await.unwrap_err();
    assert_eq!(err, ApiError::Network("connection refused".into()));
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let fx = ApiFixture::new();
    fx.transport.push(200, r#"{"not":"a list"}"#);
    let err = fx.client().list_trips().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use city_explorer::api::{self, GENERIC_FAILURE};
use city_explorer::clients::Provider;
use city_explorer::config::Config;
use city_explorer::state::SharedState;
use common::{FakeGateway, memory_store};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn spawn_app(gateway: Arc<FakeGateway>) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let store = memory_store().await;
    let shared = Arc::new(SharedState::with_gateway(config, store, gateway));
    api::router(api::create_app_state(shared, None))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_location_lookup_returns_stored_record() {
    let gateway = Arc::new(FakeGateway::default());
    let app = spawn_app(gateway.clone()).await;

    let (status, body) = get_json(&app, "/location?data=Seattle%2C%20WA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["search_query"], "Seattle, WA");
    assert_eq!(body["formatted_query"], "Seattle, WA, USA");
    assert_eq!(body["latitude"], 47.6062);

    let (status, _) = get_json(&app, "/location?data=Seattle%2C%20WA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateway.geocode_calls(), 1);
}

#[tokio::test]
async fn test_missing_parameters_are_bad_requests() {
    let app = spawn_app(Arc::new(FakeGateway::default())).await;

    for uri in [
        "/location",
        "/location?data=%20%20",
        "/weather",
        "/weather?id=abc",
        "/events?latitude=47.6",
        "/events?latitude=200&longitude=0",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_weather_fetch_then_cached_read() {
    let gateway = Arc::new(FakeGateway::default());
    let app = spawn_app(gateway.clone()).await;

    get_json(&app, "/location?data=Seattle").await;

    let (status, fetched) = get_json(
        &app,
        "/weather?latitude=47.6062&longitude=-122.3321&location_id=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched.as_array().unwrap().len(), 3);
    assert_eq!(fetched[0]["time"], "Sat Dec 22 2018");
    assert_eq!(fetched[0]["forecast"], "Rain throughout the day.");

    let (status, cached) = get_json(&app, "/weather?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, fetched);
    assert_eq!(gateway.forecast_calls(), 1);
}

#[tokio::test]
async fn test_bracketed_parameter_aliases() {
    let gateway = Arc::new(FakeGateway::default());
    let app = spawn_app(gateway.clone()).await;

    let (status, events) = get_json(
        &app,
        "/events?data%5Blatitude%5D=47.6062&data%5Blongitude%5D=-122.3321",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().unwrap().len(), 3);
    assert_eq!(events[0]["link"], "https://www.eventbrite.com/e/0");

    let (status, cached) = get_json(&app, "/events?data%5Bid%5D=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, serde_json::json!([]));
    assert_eq!(gateway.events_calls(), 1);
}

#[tokio::test]
async fn test_resolver_failures_use_the_generic_message() {
    let gateway = Arc::new(FakeGateway::default().unavailable(Provider::Geocode));
    let app = spawn_app(gateway).await;

    let (status, body) = get(&app, "/location?data=Seattle").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), GENERIC_FAILURE);
}

#[tokio::test]
async fn test_health_and_disabled_metrics() {
    let app = spawn_app(Arc::new(FakeGateway::default())).await;

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);

    let (status, _) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let app = spawn_app(Arc::new(FakeGateway::default())).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

//! MongoDB round-trip tests for the events domain
//!
//! These need Docker and are ignored by default:
//! `cargo test -p domain_events -- --ignored`

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::BearerAuth;
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::assertions::assert_contains_fields;
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt;

fn app(mongo: &TestMongo, collection: &str) -> Router {
    let repository = MongoEventRepository::new(&mongo.database("auditlog_test"), collection);
    let schema = Arc::new(EventSchema::bundled().unwrap());
    router(EventService::new(repository, schema), BearerAuth::disabled())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(event: &Value) -> Request<Body> {
    Request::post("/events")
        .header("content-type", "application/json")
        .body(Body::from(event.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_then_query_round_trip() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_round_trip");
    let login = builder.event("login");
    let logout = builder.event("logout");

    assert_eq!(send(app(&mongo, "round_trip"), post(&login)).await.0, StatusCode::NO_CONTENT);
    assert_eq!(send(app(&mongo, "round_trip"), post(&logout)).await.0, StatusCode::NO_CONTENT);

    let (status, body) = send(app(&mongo, "round_trip"), get("/events")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let uri = format!(
        "/events?source.service_name={}",
        builder.service_name("logout")
    );
    let (_, body) = send(app(&mongo, "round_trip"), get(&uri)).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_contains_fields(&events[0], &logout, "filtered event");

    let id = events[0]["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24);

    let (_, body) = send(app(&mongo, "round_trip"), get(&format!("/events?_id={}", id))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unmatched_filters_return_empty_array() {
    let mongo = TestMongo::new().await;
    let event = TestDataBuilder::from_test_name("mongo_unmatched").event("login");
    send(app(&mongo, "unmatched"), post(&event)).await;

    for uri in [
        "/events?_id=not-an-id".to_string(),
        format!("/events?timestamp={}", event["timestamp"]),
        "/events?summary=nope".to_string(),
    ] {
        let (status, body) = send(app(&mongo, "unmatched"), get(&uri)).await;
        assert_eq!(status, StatusCode::OK, "uri: {}", uri);
        assert_eq!(body, json!([]), "uri: {}", uri);
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_timestamp_beyond_signed_range_round_trips() {
    let mongo = TestMongo::new().await;
    let mut event = TestDataBuilder::from_test_name("mongo_large_timestamp").event("login");
    event["timestamp"] = json!(10000000000000000000u64);

    let (status, _) = send(app(&mongo, "large_timestamp"), post(&event)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(app(&mongo, "large_timestamp"), get("/events")).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["timestamp"].as_f64(), Some(1e19));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_repository_ping() {
    let mongo = TestMongo::new().await;
    let repository = MongoEventRepository::new(&mongo.database("auditlog_test"), "event");
    assert!(repository.ping().await.is_ok());
}

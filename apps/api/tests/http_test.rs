//! Integration tests for the HTTP surface
//!
//! Exercises the assembled router with `oneshot` requests: the GraphQL
//! endpoint, the playground and the health probes.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::*;
use murmur_api::routes::app_router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn create_test_app(playground_enabled: bool) -> (Router, SeededGraph) {
    let graph = seeded_graph().await;
    let app = app_router(service(&graph.store), playground_enabled);
    (app, graph)
}

fn graphql_post(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_graphql_post_returns_data() {
    let (app, graph) = create_test_app(false).await;

    let response = app
        .oneshot(graphql_post(json!({ "query": "{ users { name } }" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({ "data": { "users": [{ "name": "alice" }, { "name": "bob" }, { "name": "carol" }] } })
    );
    assert_eq!(graph.store.call_count("list_users"), 1);
}

#[tokio::test]
async fn test_graphql_post_with_variables_and_operation_name() {
    let (app, graph) = create_test_app(false).await;

    let response = app
        .oneshot(graphql_post(json!({
            "query": "query Other { users { id } } query One($id: UUID!) { user(id: $id) { name } }",
            "variables": { "id": graph.bob().id },
            "operationName": "One",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["user"]["name"], "bob");
    assert_eq!(graph.store.call_count("list_users"), 0);
}

#[tokio::test]
async fn test_validation_failure_has_no_data_key() {
    let (app, _graph) = create_test_app(false).await;

    let response = app
        .oneshot(graphql_post(json!({
            "query": "{ users { posts { author { profile { memberType { id } } } } } }"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("data"));
    assert_eq!(object["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_playground_served_when_enabled() {
    let (app, _graph) = create_test_app(true).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("GraphQL Playground"));
}

#[tokio::test]
async fn test_playground_absent_when_disabled() {
    let (app, _graph) = create_test_app(false).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_simple_health_check() {
    let (app, _graph) = create_test_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_liveness_probe() {
    let (app, _graph) = create_test_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "alive");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_probe_pings_store() {
    let (app, graph) = create_test_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "healthy");
    assert_eq!(graph.store.call_count("ping"), 1);
}

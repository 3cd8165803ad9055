//! Helpers for executing GraphQL operations in tests

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Variables};
use murmur_api::graphql::{GraphQLService, LoaderConfig};
use murmur_api::store::MemoryStore;
use serde_json::Value;

/// Build a service over `store` with the default loader configuration
pub fn service(store: &Arc<MemoryStore>) -> GraphQLService {
    GraphQLService::new(store.clone(), LoaderConfig::default())
}

/// Execute a query and return the serialized response envelope
pub async fn execute(service: &GraphQLService, query: &str) -> Value {
    let envelope = service.execute(query).await;
    serde_json::to_value(&envelope).expect("serialize envelope")
}

/// Execute a query with JSON variables
pub async fn execute_with(service: &GraphQLService, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let envelope = service.execute(request).await;
    serde_json::to_value(&envelope).expect("serialize envelope")
}

/// `code` extension of the first error in a response
pub fn first_error_code(response: &Value) -> Option<&str> {
    response["errors"][0]["extensions"]["code"].as_str()
}

/// Assert a response executed cleanly and return its `data`
pub fn data(response: &Value) -> &Value {
    assert!(
        response.get("errors").is_none(),
        "unexpected errors: {}",
        response["errors"]
    );
    &response["data"]
}

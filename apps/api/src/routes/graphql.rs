//! GraphQL HTTP endpoint
//!
//! - `POST /` - execute a GraphQL operation
//! - `GET /` - GraphQL Playground (when enabled)

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::GraphQLRequest;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::post,
    Json, Router,
};

use crate::graphql::{GraphQLEnvelope, GraphQLService};

/// Create the GraphQL router
pub fn graphql_router(service: GraphQLService, playground_enabled: bool) -> Router {
    let route = if playground_enabled {
        post(graphql_handler).get(graphql_playground)
    } else {
        post(graphql_handler)
    };

    Router::new().route("/", route).with_state(service)
}

/// Execute a GraphQL operation
///
/// Always answers 200; failures are reported in the `errors` array.
async fn graphql_handler(
    State(service): State<GraphQLService>,
    request: GraphQLRequest,
) -> Json<GraphQLEnvelope> {
    Json(service.execute(request.into_inner()).await)
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/")))
}

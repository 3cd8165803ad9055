//! HTTP route handlers for the Murmur API
//!
//! - GraphQL endpoint and playground on `/`
//! - Health check and readiness endpoints under `/health`

pub mod graphql;
pub mod health;

pub use graphql::graphql_router;
pub use health::{health_router, HealthState};

use axum::Router;

use crate::graphql::GraphQLService;

/// Assemble every route; middleware layers are added by the caller
pub fn app_router(service: GraphQLService, playground_enabled: bool) -> Router {
    let health_state = HealthState::new(service.store().clone());

    Router::new()
        .merge(graphql_router(service, playground_enabled))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(health_state))
}

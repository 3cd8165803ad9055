//! GraphQL schema and per-request execution for Murmur
//!
//! The schema is built once at startup. Each operation executed through
//! [`GraphQLService`] gets a fresh [`Loaders`] registry attached as request
//! data, so loader caches live exactly as long as the operation.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Request, Response, Schema, ServerError, Value};
use serde::Serialize;

use crate::store::Store;

use super::loaders::{LoaderConfig, Loaders};
use super::mutation::Mutation;
use super::query::Query;

/// Maximum query depth, with root fields at depth 0
///
/// A field nested `MAX_QUERY_DEPTH` levels below a root field is the deepest
/// allowed, so an operation may select `MAX_QUERY_DEPTH + 1` field levels.
/// async-graphql counts the root field as level 1, hence the `+ 1` below.
pub const MAX_QUERY_DEPTH: usize = 5;

/// The Murmur GraphQL schema type
pub type MurmurSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with the shared store and the depth limit
pub fn build_schema(store: Arc<dyn Store>) -> MurmurSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(store)
        .limit_depth(MAX_QUERY_DEPTH + 1)
        .finish()
}

/// Response body for a GraphQL operation
///
/// `data` is left out entirely when the operation failed before execution
/// (parse or validation errors), leaving only `errors`. Errors raised during
/// execution carry a path; if null propagation reaches the root they keep
/// `"data": null`.
#[derive(Debug, Serialize)]
pub struct GraphQLEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServerError>,
}

impl GraphQLEnvelope {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<Response> for GraphQLEnvelope {
    fn from(response: Response) -> Self {
        let before_execution = !response.errors.is_empty()
            && response.errors.iter().all(|error| error.path.is_empty());

        let data = match response.data {
            Value::Null if before_execution => None,
            data => Some(data),
        };

        Self {
            data,
            errors: response.errors,
        }
    }
}

/// Executes operations against the shared schema with request-scoped loaders
#[derive(Clone)]
pub struct GraphQLService {
    schema: MurmurSchema,
    store: Arc<dyn Store>,
    loader_config: LoaderConfig,
}

impl GraphQLService {
    pub fn new(store: Arc<dyn Store>, loader_config: LoaderConfig) -> Self {
        Self {
            schema: build_schema(store.clone()),
            store,
            loader_config,
        }
    }

    pub fn schema(&self) -> &MurmurSchema {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Execute one operation with a fresh loader registry
    pub async fn execute(&self, request: impl Into<Request>) -> GraphQLEnvelope {
        let loaders = Loaders::new(self.store.clone(), &self.loader_config);
        let request = request.into().data(loaders);

        let response = self.schema.execute(request).await;
        if !response.errors.is_empty() {
            tracing::debug!(errors = response.errors.len(), "GraphQL operation returned errors");
        }

        GraphQLEnvelope::from(response)
    }
}

//! GraphQL API for Murmur
//!
//! - Query and mutation resolvers over users, posts, profiles and member types
//! - Object types whose relation fields resolve through request-scoped loaders
//! - The schema, built once, and the per-request execution wrapper

pub mod error;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::{LoaderConfig, Loaders};
pub use schema::{build_schema, GraphQLEnvelope, GraphQLService, MurmurSchema, MAX_QUERY_DEPTH};

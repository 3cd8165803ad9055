//! Conversion of API errors into GraphQL field errors

use std::borrow::Borrow;

use async_graphql::ErrorExtensions;

use crate::error::ApiError;

/// Convert an API error into a GraphQL error with a `code` extension
///
/// Client errors keep their message; server errors are logged and replaced
/// with a generic message. Accepts both owned errors from direct store calls
/// and the shared `Arc<ApiError>` a failed batch hands to every waiter.
pub fn to_graphql_error(error: impl Borrow<ApiError>) -> async_graphql::Error {
    let error = error.borrow();
    let code = error.error_code();

    let message = if error.is_client_error() {
        error.to_string()
    } else {
        error.log();
        "An unexpected error occurred".to_string()
    };

    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

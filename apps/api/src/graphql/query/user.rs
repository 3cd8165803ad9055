//! User queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{loaders_from, store_from, User};

/// User lookups
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a user by ID
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let store = store_from(ctx)?;
        let user = store.find_user(id).await.map_err(to_graphql_error)?;
        Ok(user.map(User::from))
    }

    /// List every user
    ///
    /// Primes the user loader so subscription traversals below resolve from
    /// the request cache.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let store = store_from(ctx)?;
        let users = store.list_users().await.map_err(to_graphql_error)?;

        let loaders = loaders_from(ctx)?;
        loaders
            .user
            .prime_many(users.iter().map(|u| (u.id, Some(u.clone()))))
            .await;

        Ok(users.into_iter().map(User::from).collect())
    }
}

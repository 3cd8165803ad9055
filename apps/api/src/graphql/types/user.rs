//! User GraphQL type
//!
//! Relation fields go through the request's loaders so that sibling users
//! resolve their profiles, posts and subscriptions in one fetch per relation.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::models::User as DbUser;

use super::loaders_from;
use super::post::Post;
use super::profile::Profile;

/// User exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }

    /// Resolve a list of user ids through the user loader, skipping ids
    /// that no longer exist
    async fn load_users(ctx: &Context<'_>, ids: &[Uuid]) -> Result<Vec<User>> {
        let loaders = loaders_from(ctx)?;
        let users = loaders
            .user
            .load_many(ids)
            .await
            .map_err(to_graphql_error)?;

        Ok(users.into_iter().flatten().map(User::from).collect())
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn balance(&self) -> f64 {
        self.inner.balance
    }

    // Relationship resolvers

    /// The user's profile, if one was created
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let loaders = loaders_from(ctx)?;
        let profile = loaders
            .profile
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(profile.map(Profile::from))
    }

    /// Posts authored by this user; empty when there are none
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let loaders = loaders_from(ctx)?;
        let posts = loaders
            .post
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Authors this user is subscribed to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        Self::load_users(ctx, &self.inner.subscribed_to).await
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        Self::load_users(ctx, &self.inner.subscribers).await
    }
}

//! Post GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::models::Post as DbPost;

use super::loaders_from;
use super::user::User;

/// Post exposed via GraphQL
pub struct Post {
    inner: DbPost,
}

impl Post {
    pub fn new(post: DbPost) -> Self {
        Self { inner: post }
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self::new(post)
    }
}

#[Object]
impl Post {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn author_id(&self) -> Uuid {
        self.inner.author_id
    }

    /// Author of the post (batched through the user loader)
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loaders = loaders_from(ctx)?;
        let author = loaders
            .user
            .load(self.inner.author_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(author.map(User::from))
    }
}

//! Post mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{store_from, Post};
use crate::models::{CreatePost, UpdatePost};

/// Input for creating a post
#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    /// Must reference an existing user
    pub author_id: Uuid,
}

impl From<CreatePostInput> for CreatePost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        }
    }
}

/// Input for changing a post; omitted fields keep their value
#[derive(Debug, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ChangePostInput> for UpdatePost {
    fn from(input: ChangePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

/// Post mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let store = store_from(ctx)?;
        let post = store.create_post(dto.into()).await.map_err(to_graphql_error)?;
        Ok(Post::from(post))
    }

    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> Result<Post> {
        let store = store_from(ctx)?;
        let post = store
            .update_post(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(Post::from(post))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = store_from(ctx)?;
        store.delete_post(id).await.map_err(to_graphql_error)?;
        Ok(true)
    }
}

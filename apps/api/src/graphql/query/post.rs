//! Post queries

use std::collections::HashMap;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{loaders_from, store_from, Post};
use crate::models::Post as DbPost;

/// Post lookups
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get a post by ID
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let store = store_from(ctx)?;
        let post = store.find_post(id).await.map_err(to_graphql_error)?;
        Ok(post.map(Post::from))
    }

    /// List every post
    ///
    /// The full table holds every author's complete post list, so each group
    /// is primed into the posts-by-author loader.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let store = store_from(ctx)?;
        let posts = store.list_posts().await.map_err(to_graphql_error)?;

        let loaders = loaders_from(ctx)?;
        loaders.post.prime_many(group_by_author(&posts)).await;

        Ok(posts.into_iter().map(Post::from).collect())
    }
}

fn group_by_author(posts: &[DbPost]) -> HashMap<Uuid, Vec<DbPost>> {
    let mut groups: HashMap<Uuid, Vec<DbPost>> = HashMap::new();
    for post in posts {
        groups.entry(post.author_id).or_default().push(post.clone());
    }
    groups
}

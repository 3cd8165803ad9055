//! Posts grouped by author

use async_trait::async_trait;
use uuid::Uuid;

use super::batch::BulkFetch;
use super::reshape::FanOut;
use crate::error::ApiResult;
use crate::models::Post;
use crate::store::Store;

/// Batches `User.posts`; authors without posts resolve to an empty list
pub struct PostsByAuthor;

#[async_trait]
impl BulkFetch for PostsByAuthor {
    type Key = Uuid;
    type Row = Post;
    type Shape = FanOut;

    const ENTITY: &'static str = "post";

    fn key_of(row: &Post) -> Uuid {
        row.author_id
    }

    async fn fetch(store: &dyn Store, keys: &[Uuid]) -> ApiResult<Vec<Post>> {
        store.find_posts_by_authors(keys).await
    }
}

//! Users by id, with their subscription edges

use async_trait::async_trait;
use uuid::Uuid;

use super::batch::BulkFetch;
use super::reshape::Singular;
use crate::error::ApiResult;
use crate::models::User;
use crate::store::Store;

/// Batches `User` lookups for `Post.author`, `Profile.user` and the
/// subscription lists
pub struct UserById;

#[async_trait]
impl BulkFetch for UserById {
    type Key = Uuid;
    type Row = User;
    type Shape = Singular;

    const ENTITY: &'static str = "user";

    fn key_of(row: &User) -> Uuid {
        row.id
    }

    async fn fetch(store: &dyn Store, keys: &[Uuid]) -> ApiResult<Vec<User>> {
        store.find_users_by_ids(keys).await
    }
}

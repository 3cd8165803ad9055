use async_trait::async_trait;
use uuid::Uuid;

use super::batch::BulkFetch;
use super::reshape::Singular;
use crate::error::ApiResult;
use crate::models::Profile;
use crate::store::Store;

/// Batches `User.profile`, keyed by the owning user's id
pub struct ProfileByUser;

#[async_trait]
impl BulkFetch for ProfileByUser {
    type Key = Uuid;
    type Row = Profile;
    type Shape = Singular;

    const ENTITY: &'static str = "profile";

    fn key_of(row: &Profile) -> Uuid {
        row.user_id
    }

    async fn fetch(store: &dyn Store, keys: &[Uuid]) -> ApiResult<Vec<Profile>> {
        store.find_profiles_by_users(keys).await
    }
}

//! Member types by id

use async_trait::async_trait;

use super::batch::BulkFetch;
use super::reshape::Singular;
use crate::error::ApiResult;
use crate::models::{MemberType, MemberTypeId};
use crate::store::Store;

/// Batches `Profile.memberType`
pub struct MemberTypeById;

#[async_trait]
impl BulkFetch for MemberTypeById {
    type Key = MemberTypeId;
    type Row = MemberType;
    type Shape = Singular;

    const ENTITY: &'static str = "member_type";

    fn key_of(row: &MemberType) -> MemberTypeId {
        row.id
    }

    async fn fetch(store: &dyn Store, keys: &[MemberTypeId]) -> ApiResult<Vec<MemberType>> {
        store.find_member_types_by_ids(keys).await
    }
}

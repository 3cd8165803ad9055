//! Member type queries

use async_graphql::{Context, Object, Result};

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{loaders_from, store_from, MemberType, MemberTypeId};

/// Member type lookups
#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// Get a member type by ID
    ///
    /// Unknown ids are rejected by enum validation before this runs.
    async fn member_type(&self, ctx: &Context<'_>, id: MemberTypeId) -> Result<Option<MemberType>> {
        let store = store_from(ctx)?;
        let member_type = store
            .find_member_type(id.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(member_type.map(MemberType::from))
    }

    /// List every member type, priming the member type loader
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let store = store_from(ctx)?;
        let member_types = store.list_member_types().await.map_err(to_graphql_error)?;

        let loaders = loaders_from(ctx)?;
        loaders
            .member_type
            .prime_many(member_types.iter().map(|m| (m.id, Some(m.clone()))))
            .await;

        Ok(member_types.into_iter().map(MemberType::from).collect())
    }
}

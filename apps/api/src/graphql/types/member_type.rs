//! Member type GraphQL types

use async_graphql::{Context, Enum, Object, Result};

use crate::graphql::error::to_graphql_error;
use crate::models::{MemberType as DbMemberType, MemberTypeId as DbMemberTypeId};

use super::profile::Profile;
use super::store_from;

/// Member type identifier; a closed set of tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl From<DbMemberTypeId> for MemberTypeId {
    fn from(id: DbMemberTypeId) -> Self {
        match id {
            DbMemberTypeId::Basic => Self::Basic,
            DbMemberTypeId::Business => Self::Business,
        }
    }
}

impl From<MemberTypeId> for DbMemberTypeId {
    fn from(id: MemberTypeId) -> Self {
        match id {
            MemberTypeId::Basic => Self::Basic,
            MemberTypeId::Business => Self::Business,
        }
    }
}

/// Membership tier exposed via GraphQL
pub struct MemberType {
    inner: DbMemberType,
}

impl MemberType {
    pub fn new(member_type: DbMemberType) -> Self {
        Self { inner: member_type }
    }
}

impl From<DbMemberType> for MemberType {
    fn from(member_type: DbMemberType) -> Self {
        Self::new(member_type)
    }
}

#[Object]
impl MemberType {
    async fn id(&self) -> MemberTypeId {
        self.inner.id.into()
    }

    /// Discount percentage for this tier
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    /// Number of posts a member may publish per month
    async fn posts_limit_per_month(&self) -> i32 {
        self.inner.posts_limit_per_month
    }

    /// Profiles on this tier (direct store call, never batched)
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let store = store_from(ctx)?;
        let profiles = store
            .find_profiles_by_member_type(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(profiles.into_iter().map(Profile::from).collect())
    }
}

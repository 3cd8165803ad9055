//! Profile GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::models::Profile as DbProfile;

use super::loaders_from;
use super::member_type::{MemberType, MemberTypeId};
use super::user::User;

/// Profile exposed via GraphQL
pub struct Profile {
    inner: DbProfile,
}

impl Profile {
    pub fn new(profile: DbProfile) -> Self {
        Self { inner: profile }
    }
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self::new(profile)
    }
}

#[Object]
impl Profile {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id.into()
    }

    // Relationship resolvers

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loaders = loaders_from(ctx)?;
        let user = loaders
            .user
            .load(self.inner.user_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(user.map(User::from))
    }

    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let loaders = loaders_from(ctx)?;
        let member_type = loaders
            .member_type
            .load(self.inner.member_type_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(member_type.map(MemberType::from))
    }
}

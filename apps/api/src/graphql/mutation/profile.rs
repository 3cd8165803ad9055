//! Profile mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{store_from, MemberTypeId, Profile};
use crate::models::{CreateProfile, UpdateProfile};

/// Input for creating a profile; a user may own at most one
#[derive(Debug, InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

impl From<CreateProfileInput> for CreateProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id.into(),
        }
    }
}

/// Input for changing a profile; omitted fields keep their value
#[derive(Debug, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
}

impl From<ChangeProfileInput> for UpdateProfile {
    fn from(input: ChangeProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
        }
    }
}

/// Profile mutations
#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let store = store_from(ctx)?;
        let profile = store
            .create_profile(dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(Profile::from(profile))
    }

    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let store = store_from(ctx)?;
        let profile = store
            .update_profile(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(Profile::from(profile))
    }

    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = store_from(ctx)?;
        store.delete_profile(id).await.map_err(to_graphql_error)?;
        Ok(true)
    }
}

//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{loaders_from, store_from, Profile};

/// Profile lookups
#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// Get a profile by ID
    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let store = store_from(ctx)?;
        let profile = store.find_profile(id).await.map_err(to_graphql_error)?;
        Ok(profile.map(Profile::from))
    }

    /// List every profile, priming the profile-by-user loader
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let store = store_from(ctx)?;
        let profiles = store.list_profiles().await.map_err(to_graphql_error)?;

        let loaders = loaders_from(ctx)?;
        loaders
            .profile
            .prime_many(profiles.iter().map(|p| (p.user_id, Some(p.clone()))))
            .await;

        Ok(profiles.into_iter().map(Profile::from).collect())
    }
}

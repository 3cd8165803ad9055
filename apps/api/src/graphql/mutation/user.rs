//! User mutations
//!
//! - createUser / changeUser / deleteUser
//! - subscribeTo / unsubscribeFrom: directed subscription edges

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::error::to_graphql_error;
use crate::graphql::types::{store_from, User};
use crate::models::{CreateUser, UpdateUser};

/// Input for creating a user
#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for CreateUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

/// Input for changing a user; omitted fields keep their value
#[derive(Debug, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<ChangeUserInput> for UpdateUser {
    fn from(input: ChangeUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

/// User mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let store = store_from(ctx)?;
        let user = store.create_user(dto.into()).await.map_err(to_graphql_error)?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(User::from(user))
    }

    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        let store = store_from(ctx)?;
        let user = store
            .update_user(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(User::from(user))
    }

    /// Delete a user along with their posts, profile and subscriptions
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let store = store_from(ctx)?;
        store.delete_user(id).await.map_err(to_graphql_error)?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(true)
    }

    /// Subscribe `user_id` to `author_id`; returns the subscriber
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<User> {
        let store = store_from(ctx)?;
        let user = store
            .subscribe(user_id, author_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(User::from(user))
    }

    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let store = store_from(ctx)?;
        store
            .unsubscribe(user_id, author_id)
            .await
            .map_err(to_graphql_error)?;
        Ok(true)
    }
}

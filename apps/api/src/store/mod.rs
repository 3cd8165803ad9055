//! Data access layer for Murmur
//!
//! Every read and write the API performs goes through the [`Store`] trait.
//! Two implementations exist:
//! - [`PgStore`]: PostgreSQL via SQLx, used in every deployed environment
//! - [`MemoryStore`]: in-process tables for local development and tests
//!
//! The bulk `find_*_by_*` methods are the batch fetches behind the GraphQL
//! loaders; each one must be a single round trip no matter how many keys it
//! receives, and may return rows in any order.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{
    CreatePost, CreateProfile, CreateUser, MemberType, MemberTypeId, Post, Profile, UpdatePost,
    UpdateProfile, UpdateUser, User,
};

/// CRUD access to users, posts, profiles and member types
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Check that the backing store is reachable
    async fn ping(&self) -> ApiResult<()>;

    // ==================== Users ====================

    async fn find_user(&self, id: Uuid) -> ApiResult<Option<User>>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;

    /// Bulk fetch users (with subscription edges) by id
    async fn find_users_by_ids(&self, ids: &[Uuid]) -> ApiResult<Vec<User>>;

    async fn create_user(&self, input: CreateUser) -> ApiResult<User>;

    /// Update a user; fails with `NotFound` when the user does not exist
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> ApiResult<User>;

    /// Delete a user together with its posts, profile and subscription edges
    async fn delete_user(&self, id: Uuid) -> ApiResult<()>;

    /// Add a `subscriber -> author` edge and return the updated subscriber
    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<User>;

    /// Remove a `subscriber -> author` edge; removing a missing edge is a no-op
    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<()>;

    // ==================== Posts ====================

    async fn find_post(&self, id: Uuid) -> ApiResult<Option<Post>>;

    async fn list_posts(&self) -> ApiResult<Vec<Post>>;

    /// Bulk fetch every post written by any of the given authors
    async fn find_posts_by_authors(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Post>>;

    async fn create_post(&self, input: CreatePost) -> ApiResult<Post>;

    async fn update_post(&self, id: Uuid, changes: UpdatePost) -> ApiResult<Post>;

    async fn delete_post(&self, id: Uuid) -> ApiResult<()>;

    // ==================== Profiles ====================

    async fn find_profile(&self, id: Uuid) -> ApiResult<Option<Profile>>;

    async fn list_profiles(&self) -> ApiResult<Vec<Profile>>;

    /// Bulk fetch profiles owned by any of the given users
    async fn find_profiles_by_users(&self, user_ids: &[Uuid]) -> ApiResult<Vec<Profile>>;

    async fn find_profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> ApiResult<Vec<Profile>>;

    /// Create a profile; a user may own at most one
    async fn create_profile(&self, input: CreateProfile) -> ApiResult<Profile>;

    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> ApiResult<Profile>;

    async fn delete_profile(&self, id: Uuid) -> ApiResult<()>;

    // ==================== Member types ====================

    async fn find_member_type(&self, id: MemberTypeId) -> ApiResult<Option<MemberType>>;

    async fn list_member_types(&self) -> ApiResult<Vec<MemberType>>;

    /// Bulk fetch member types by id
    async fn find_member_types_by_ids(&self, ids: &[MemberTypeId])
        -> ApiResult<Vec<MemberType>>;
}

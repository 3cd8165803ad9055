//! In-process store for local development and tests
//!
//! Tables live behind a single Tokio `RwLock` and keep insertion order, which
//! stands in for the "store order" of the PostgreSQL backend. Every trait
//! call is counted so tests can assert how many round trips an operation
//! cost.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreatePost, CreateProfile, CreateUser, MemberType, MemberTypeId, Post, Profile, UpdatePost,
    UpdateProfile, UpdateUser, User,
};

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    name: String,
    balance: f64,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    posts: Vec<Post>,
    profiles: Vec<Profile>,
    member_types: Vec<MemberType>,
    /// `(subscriber_id, author_id)` edges in creation order
    subscriptions: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    /// Attach subscription edges to a user record
    fn hydrate(&self, record: &UserRecord) -> User {
        User {
            id: record.id,
            name: record.name.clone(),
            balance: record.balance,
            subscribed_to: self
                .subscriptions
                .iter()
                .filter(|(subscriber, _)| *subscriber == record.id)
                .map(|(_, author)| *author)
                .collect(),
            subscribers: self
                .subscriptions
                .iter()
                .filter(|(_, author)| *author == record.id)
                .map(|(subscriber, _)| *subscriber)
                .collect(),
        }
    }

    fn find_user(&self, id: Uuid) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|record| self.hydrate(record))
    }
}

/// Store implementation over in-memory tables
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: DashMap<&'static str, usize>,
}

impl MemoryStore {
    /// Create an empty store seeded with the member type catalogue
    pub fn new() -> Self {
        let tables = Tables {
            member_types: MemberTypeId::ALL
                .into_iter()
                .map(MemberType::seeded)
                .collect(),
            ..Tables::default()
        };

        Self {
            tables: RwLock::new(tables),
            calls: DashMap::new(),
        }
    }

    /// Number of times the named store operation has been called
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.get(operation).map(|count| *count).unwrap_or(0)
    }

    /// Forget all recorded call counts
    pub fn reset_call_counts(&self) {
        self.calls.clear();
    }

    fn record(&self, operation: &'static str) {
        *self.calls.entry(operation).or_insert(0) += 1;
        tracing::debug!(operation, "Memory store call");
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> ApiResult<()> {
        self.record("ping");
        Ok(())
    }

    // ==================== Users ====================

    async fn find_user(&self, id: Uuid) -> ApiResult<Option<User>> {
        self.record("find_user");
        Ok(self.tables.read().await.find_user(id))
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.record("list_users");
        let tables = self.tables.read().await;
        Ok(tables.users.iter().map(|u| tables.hydrate(u)).collect())
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> ApiResult<Vec<User>> {
        self.record("find_users_by_ids");
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(|u| tables.hydrate(u))
            .collect())
    }

    async fn create_user(&self, input: CreateUser) -> ApiResult<User> {
        self.record("create_user");
        let mut tables = self.tables.write().await;
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: input.name,
            balance: input.balance,
        };
        let user = tables.hydrate(&record);
        tables.users.push(record);
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> ApiResult<User> {
        self.record("update_user");
        let mut tables = self.tables.write().await;
        let mut user = tables
            .find_user(id)
            .ok_or_else(|| ApiError::not_found("user", id))?;

        changes.apply(&mut user);
        if let Some(record) = tables.users.iter_mut().find(|u| u.id == id) {
            record.name = user.name.clone();
            record.balance = user.balance;
        }

        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        self.record("delete_user");
        let mut tables = self.tables.write().await;
        if !tables.user_exists(id) {
            return Err(ApiError::not_found("user", id));
        }

        tables.users.retain(|u| u.id != id);
        tables.posts.retain(|p| p.author_id != id);
        tables.profiles.retain(|p| p.user_id != id);
        tables
            .subscriptions
            .retain(|(subscriber, author)| *subscriber != id && *author != id);
        Ok(())
    }

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<User> {
        self.record("subscribe");
        let mut tables = self.tables.write().await;
        if !tables.user_exists(subscriber_id) || !tables.user_exists(author_id) {
            return Err(ApiError::ValidationError(
                "subscription references a record that does not exist".to_string(),
            ));
        }
        if tables.subscriptions.contains(&(subscriber_id, author_id)) {
            return Err(ApiError::conflict(
                "subscription",
                format!("{} -> {}", subscriber_id, author_id),
            ));
        }

        tables.subscriptions.push((subscriber_id, author_id));
        tables
            .find_user(subscriber_id)
            .ok_or_else(|| ApiError::not_found("user", subscriber_id))
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<()> {
        self.record("unsubscribe");
        let mut tables = self.tables.write().await;
        if !tables.user_exists(subscriber_id) {
            return Err(ApiError::not_found("user", subscriber_id));
        }

        tables
            .subscriptions
            .retain(|edge| *edge != (subscriber_id, author_id));
        Ok(())
    }

    // ==================== Posts ====================

    async fn find_post(&self, id: Uuid) -> ApiResult<Option<Post>> {
        self.record("find_post");
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.record("list_posts");
        Ok(self.tables.read().await.posts.clone())
    }

    async fn find_posts_by_authors(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Post>> {
        self.record("find_posts_by_authors");
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect())
    }

    async fn create_post(&self, input: CreatePost) -> ApiResult<Post> {
        self.record("create_post");
        let mut tables = self.tables.write().await;
        if !tables.user_exists(input.author_id) {
            return Err(ApiError::ValidationError(
                "post references a record that does not exist".to_string(),
            ));
        }

        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, changes: UpdatePost) -> ApiResult<Post> {
        self.record("update_post");
        let mut tables = self.tables.write().await;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found("post", id))?;

        changes.apply(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<()> {
        self.record("delete_post");
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);

        if tables.posts.len() == before {
            return Err(ApiError::not_found("post", id));
        }
        Ok(())
    }

    // ==================== Profiles ====================

    async fn find_profile(&self, id: Uuid) -> ApiResult<Option<Profile>> {
        self.record("find_profile");
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
        self.record("list_profiles");
        Ok(self.tables.read().await.profiles.clone())
    }

    async fn find_profiles_by_users(&self, user_ids: &[Uuid]) -> ApiResult<Vec<Profile>> {
        self.record("find_profiles_by_users");
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }

    async fn find_profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> ApiResult<Vec<Profile>> {
        self.record("find_profiles_by_member_type");
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| p.member_type_id == member_type_id)
            .cloned()
            .collect())
    }

    async fn create_profile(&self, input: CreateProfile) -> ApiResult<Profile> {
        self.record("create_profile");
        let mut tables = self.tables.write().await;
        if !tables.user_exists(input.user_id) {
            return Err(ApiError::ValidationError(
                "profile references a record that does not exist".to_string(),
            ));
        }
        if tables.profiles.iter().any(|p| p.user_id == input.user_id) {
            return Err(ApiError::conflict("profile", input.user_id));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id,
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> ApiResult<Profile> {
        self.record("update_profile");
        let mut tables = self.tables.write().await;
        let profile = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::not_found("profile", id))?;

        changes.apply(profile);
        Ok(profile.clone())
    }

    async fn delete_profile(&self, id: Uuid) -> ApiResult<()> {
        self.record("delete_profile");
        let mut tables = self.tables.write().await;
        let before = tables.profiles.len();
        tables.profiles.retain(|p| p.id != id);

        if tables.profiles.len() == before {
            return Err(ApiError::not_found("profile", id));
        }
        Ok(())
    }

    // ==================== Member types ====================

    async fn find_member_type(&self, id: MemberTypeId) -> ApiResult<Option<MemberType>> {
        self.record("find_member_type");
        let tables = self.tables.read().await;
        Ok(tables.member_types.iter().find(|m| m.id == id).cloned())
    }

    async fn list_member_types(&self) -> ApiResult<Vec<MemberType>> {
        self.record("list_member_types");
        Ok(self.tables.read().await.member_types.clone())
    }

    async fn find_member_types_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> ApiResult<Vec<MemberType>> {
        self.record("find_member_types_by_ids");
        let tables = self.tables.read().await;
        Ok(tables
            .member_types
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }
}

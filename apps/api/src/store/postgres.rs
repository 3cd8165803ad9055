//! PostgreSQL store backed by SQLx
//!
//! Queries are built at runtime from the column constants below so the
//! crate compiles without a live database.

use async_trait::async_trait;
use murmur_shared_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreatePost, CreateProfile, CreateUser, MemberType, MemberTypeId, Post, Profile, UpdatePost,
    UpdateProfile, UpdateUser, User,
};

// ============================================================================
// SQL Column Constants
// ============================================================================

/// SQL columns for user queries; expects the users relation aliased as `u`
const USER_COLUMNS: &str = r#"
    u.id, u.name, u.balance,
    ARRAY(
        SELECT s.author_id FROM subscriptions s
        WHERE s.subscriber_id = u.id ORDER BY s.created_at, s.author_id
    ) AS subscribed_to,
    ARRAY(
        SELECT s.subscriber_id FROM subscriptions s
        WHERE s.author_id = u.id ORDER BY s.created_at, s.subscriber_id
    ) AS subscribers
"#;

/// SQL columns for post queries
const POST_COLUMNS: &str = "id, title, content, author_id";

/// SQL columns for profile queries
const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

/// SQL columns for member type queries
const MEMBER_TYPE_COLUMNS: &str = "id, discount, posts_limit_per_month";

/// Map driver errors onto API errors for a write against `resource`
fn map_write_error(err: sqlx::Error, resource: &'static str, id: impl ToString) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return ApiError::conflict(resource, id);
        }
        if db_err.is_foreign_key_violation() {
            return ApiError::ValidationError(format!(
                "{} references a record that does not exist",
                resource
            ));
        }
    }
    map_read_error(err)
}

fn map_read_error(err: sqlx::Error) -> ApiError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => ApiError::DatabaseUnavailable,
        other => ApiError::Database(other),
    }
}

/// Store implementation over a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool using the shared database configuration
    pub async fn connect(config: &DatabaseConfig) -> ApiResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(&config.url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply pending migrations, including the member type seed rows
    pub async fn migrate(&self) -> ApiResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn user_exists(&self, id: Uuid) -> ApiResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_read_error)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> ApiResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_read_error)?;
        Ok(())
    }

    // ==================== Users ====================

    async fn find_user(&self, id: Uuid) -> ApiResult<Option<User>> {
        let sql = format!("SELECT {} FROM users u WHERE u.id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users u ORDER BY u.created_at, u.id",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> ApiResult<Vec<User>> {
        tracing::debug!(keys = ids.len(), "Bulk fetching users");
        let sql = format!("SELECT {} FROM users u WHERE u.id = ANY($1)", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn create_user(&self, input: CreateUser) -> ApiResult<User> {
        let sql = r#"
            INSERT INTO users (name, balance)
            VALUES ($1, $2)
            RETURNING id, name, balance,
                ARRAY[]::uuid[] AS subscribed_to,
                ARRAY[]::uuid[] AS subscribers
        "#;
        let user = sqlx::query_as::<_, User>(sql)
            .bind(&input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "user", &input.name))?;

        tracing::debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> ApiResult<User> {
        let sql = format!(
            r#"
            WITH u AS (
                UPDATE users
                SET name = COALESCE($2, name),
                    balance = COALESCE($3, balance)
                WHERE id = $1
                RETURNING id, name, balance
            )
            SELECT {} FROM u
            "#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.balance)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "user", id))?
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user", id));
        }
        Ok(())
    }

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<User> {
        let edge = format!("{} -> {}", subscriber_id, author_id);
        sqlx::query("INSERT INTO subscriptions (subscriber_id, author_id) VALUES ($1, $2)")
            .bind(subscriber_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "subscription", &edge))?;

        tracing::debug!(%subscriber_id, %author_id, "Created subscription");
        self.find_user(subscriber_id)
            .await?
            .ok_or_else(|| ApiError::not_found("user", subscriber_id))
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> ApiResult<()> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND author_id = $2")
                .bind(subscriber_id)
                .bind(author_id)
                .execute(&self.pool)
                .await
                .map_err(map_read_error)?;

        if result.rows_affected() == 0 && !self.user_exists(subscriber_id).await? {
            return Err(ApiError::not_found("user", subscriber_id));
        }
        Ok(())
    }

    // ==================== Posts ====================

    async fn find_post(&self, id: Uuid) -> ApiResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts ORDER BY created_at, id", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn find_posts_by_authors(&self, author_ids: &[Uuid]) -> ApiResult<Vec<Post>> {
        tracing::debug!(keys = author_ids.len(), "Bulk fetching posts by author");
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY created_at, id",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn create_post(&self, input: CreatePost) -> ApiResult<Post> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "post", &input.title))
    }

    async fn update_post(&self, id: Uuid, changes: UpdatePost) -> ApiResult<Post> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "post", id))?
            .ok_or_else(|| ApiError::not_found("post", id))
    }

    async fn delete_post(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("post", id));
        }
        Ok(())
    }

    // ==================== Profiles ====================

    async fn find_profile(&self, id: Uuid) -> ApiResult<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles ORDER BY created_at, id",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn find_profiles_by_users(&self, user_ids: &[Uuid]) -> ApiResult<Vec<Profile>> {
        tracing::debug!(keys = user_ids.len(), "Bulk fetching profiles by user");
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1)",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn find_profiles_by_member_type(
        &self,
        member_type_id: MemberTypeId,
    ) -> ApiResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE member_type_id = $1 ORDER BY created_at, id",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(member_type_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn create_profile(&self, input: CreateProfile) -> ApiResult<Profile> {
        let sql = format!(
            r#"
            INSERT INTO profiles (is_male, year_of_birth, user_id, member_type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "profile", input.user_id))
    }

    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> ApiResult<Profile> {
        let sql = format!(
            r#"
            UPDATE profiles
            SET is_male = COALESCE($2, is_male),
                year_of_birth = COALESCE($3, year_of_birth)
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(changes.is_male)
            .bind(changes.year_of_birth)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "profile", id))?
            .ok_or_else(|| ApiError::not_found("profile", id))
    }

    async fn delete_profile(&self, id: Uuid) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("profile", id));
        }
        Ok(())
    }

    // ==================== Member types ====================

    async fn find_member_type(&self, id: MemberTypeId) -> ApiResult<Option<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = $1",
            MEMBER_TYPE_COLUMNS
        );
        sqlx::query_as::<_, MemberType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn list_member_types(&self) -> ApiResult<Vec<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types ORDER BY id",
            MEMBER_TYPE_COLUMNS
        );
        sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }

    async fn find_member_types_by_ids(
        &self,
        ids: &[MemberTypeId],
    ) -> ApiResult<Vec<MemberType>> {
        tracing::debug!(keys = ids.len(), "Bulk fetching member types");
        // Bound as text[]; the enum array type is not registered with the driver
        let ids: Vec<&str> = ids.iter().map(MemberTypeId::as_str).collect();
        let sql = format!(
            "SELECT {} FROM member_types WHERE id::text = ANY($1)",
            MEMBER_TYPE_COLUMNS
        );
        sqlx::query_as::<_, MemberType>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_read_error)
    }
}

//! Post model for Murmur

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post record from the posts table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,

    /// Owning user
    pub author_id: Uuid,
}

/// Post creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Partial post update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePost {
    /// Apply the set fields to an existing post
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}

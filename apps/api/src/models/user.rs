//! User model for Murmur
//!
//! A user row always travels with both sides of its subscription edges so
//! that subscription traversals can be served from a loader cache.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User record from the users table joined with its subscription edges
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Account balance
    pub balance: f64,

    /// Authors this user is subscribed to
    pub subscribed_to: Vec<Uuid>,

    /// Users subscribed to this user
    pub subscribers: Vec<Uuid>,
}

/// User creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub balance: f64,
}

/// Partial user update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl UpdateUser {
    /// Apply the set fields to an existing user
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
    }
}

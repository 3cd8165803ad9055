//! Database models for Murmur
//!
//! This module contains SQLx models for:
//! - Users and their subscription edges
//! - Posts
//! - Profiles and member types

pub mod member_type;
pub mod post;
pub mod profile;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{CreatePost, Post, UpdatePost};
pub use profile::{CreateProfile, Profile, UpdateProfile};
pub use user::{CreateUser, UpdateUser, User};

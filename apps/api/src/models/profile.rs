//! Profile model for Murmur
//!
//! Each user owns at most one profile; the profile links the user to a
//! member type.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::MemberTypeId;

/// Profile record from the profiles table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,

    pub is_male: bool,

    pub year_of_birth: i32,

    /// Owning user (unique across profiles)
    pub user_id: Uuid,

    /// Membership tier
    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
}

impl UpdateProfile {
    /// Apply the set fields to an existing profile
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
    }
}

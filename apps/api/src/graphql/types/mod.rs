//! GraphQL object types for Murmur
//!
//! Each type wraps its store model and resolves relations through the
//! request's [`Loaders`].

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::Post;
pub use profile::Profile;
pub use user::User;

use std::sync::Arc;

use async_graphql::{Context, Result};

use crate::graphql::loaders::Loaders;
use crate::store::Store;

/// Loader registry attached to the current operation
pub fn loaders_from<'a>(ctx: &Context<'a>) -> Result<&'a Loaders> {
    ctx.data::<Loaders>()
}

/// Store shared by every operation
pub fn store_from<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn Store>> {
    ctx.data::<Arc<dyn Store>>()
}

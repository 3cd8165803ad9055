//! GraphQL mutations for Murmur
//!
//! Every mutation is a direct store call; none of them touch the loaders.

mod post;
mod profile;
mod user;

pub use post::{ChangePostInput, CreatePostInput, PostMutation};
pub use profile::{ChangeProfileInput, CreateProfileInput, ProfileMutation};
pub use user::{ChangeUserInput, CreateUserInput, UserMutation};

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, PostMutation, ProfileMutation);

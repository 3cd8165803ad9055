//! Request-scoped loaders for GraphQL relation fields
//!
//! Every relation resolver goes through one of these loaders instead of the
//! store, so a query touching N parents issues one bulk fetch per relation
//! rather than N lookups. A fresh [`Loaders`] registry is created for each
//! GraphQL operation and dropped with it; cached values never leak between
//! operations.
//!
//! There are two loader shapes:
//! - Singular loaders: resolve `Option<T>` for one entity per key
//! - Fan-out loaders: resolve `Vec<T>` for every entity sharing a key

mod batch;
mod member_type;
mod posts_by_author;
mod profile_by_user;
pub mod reshape;
mod user;

pub use batch::{BatchLoader, BulkFetch, Shaped, StoreLoader};
pub use member_type::MemberTypeById;
pub use posts_by_author::PostsByAuthor;
pub use profile_by_user::ProfileByUser;
pub use user::UserById;

use std::sync::Arc;
use std::time::Duration;

use crate::store::Store;

pub type UserLoader = BatchLoader<UserById>;
pub type PostsByAuthorLoader = BatchLoader<PostsByAuthor>;
pub type ProfileByUserLoader = BatchLoader<ProfileByUser>;
pub type MemberTypeLoader = BatchLoader<MemberTypeById>;

/// Batching knobs shared by every loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How long a loader waits for more keys before dispatching a batch
    pub batch_delay: Duration,
    /// Upper bound on keys per bulk fetch; larger batches are split
    pub max_batch_size: usize,
}

impl LoaderConfig {
    pub const DEFAULT_BATCH_DELAY_MS: u64 = 1;
    pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_delay: Duration::from_millis(Self::DEFAULT_BATCH_DELAY_MS),
            max_batch_size: Self::DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Loader registry for a single GraphQL operation
pub struct Loaders {
    pub user: UserLoader,
    pub post: PostsByAuthorLoader,
    pub profile: ProfileByUserLoader,
    pub member_type: MemberTypeLoader,
}

impl Loaders {
    /// Create a fresh registry with empty caches, bound to `store`
    pub fn new(store: Arc<dyn Store>, config: &LoaderConfig) -> Self {
        Self {
            user: UserLoader::new(store.clone(), config),
            post: PostsByAuthorLoader::new(store.clone(), config),
            profile: ProfileByUserLoader::new(store.clone(), config),
            member_type: MemberTypeLoader::new(store, config),
        }
    }
}

//! Seeded stores for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use murmur_api::models::{CreatePost, CreateProfile, CreateUser, MemberTypeId, Post, Profile, User};
use murmur_api::store::{MemoryStore, Store};

/// A memory store with a small social graph:
///
/// - 3 users: alice, bob, carol
/// - 5 posts: alice 3, bob 2, carol none
/// - profiles: alice (basic), bob (business); carol has none
/// - subscriptions: alice -> bob, carol -> bob
///
/// Call counts are reset after seeding.
pub struct SeededGraph {
    pub store: Arc<MemoryStore>,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub profiles: Vec<Profile>,
}

impl SeededGraph {
    pub fn alice(&self) -> &User {
        &self.users[0]
    }

    pub fn bob(&self) -> &User {
        &self.users[1]
    }

    pub fn carol(&self) -> &User {
        &self.users[2]
    }
}

pub async fn seeded_graph() -> SeededGraph {
    let store = Arc::new(MemoryStore::new());

    let mut users = Vec::new();
    for (name, balance) in [("alice", 100.0), ("bob", 50.5), ("carol", 0.0)] {
        let user = store
            .create_user(CreateUser {
                name: name.to_string(),
                balance,
            })
            .await
            .expect("seed user");
        users.push(user);
    }

    let mut posts = Vec::new();
    for (author, title) in [
        (0, "alice-1"),
        (1, "bob-1"),
        (0, "alice-2"),
        (1, "bob-2"),
        (0, "alice-3"),
    ] {
        let post = store
            .create_post(CreatePost {
                title: title.to_string(),
                content: format!("{} content", title),
                author_id: users[author].id,
            })
            .await
            .expect("seed post");
        posts.push(post);
    }

    let mut profiles = Vec::new();
    for (owner, member_type_id, year_of_birth) in [
        (0, MemberTypeId::Basic, 1990),
        (1, MemberTypeId::Business, 1985),
    ] {
        let profile = store
            .create_profile(CreateProfile {
                is_male: owner == 1,
                year_of_birth,
                user_id: users[owner].id,
                member_type_id,
            })
            .await
            .expect("seed profile");
        profiles.push(profile);
    }

    store
        .subscribe(users[0].id, users[1].id)
        .await
        .expect("seed subscription");
    store
        .subscribe(users[2].id, users[1].id)
        .await
        .expect("seed subscription");

    // Re-read users so the returned rows carry their subscription edges
    let ids: Vec<_> = users.iter().map(|u| u.id).collect();
    let mut hydrated = store.find_users_by_ids(&ids).await.expect("reload users");
    hydrated.sort_by_key(|u| ids.iter().position(|id| *id == u.id));

    store.reset_call_counts();

    SeededGraph {
        store,
        users: hydrated,
        posts,
        profiles,
    }
}

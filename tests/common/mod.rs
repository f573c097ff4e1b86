//! Common test utilities for E2E tests

#![allow(dead_code)]

use minigram::data::UserHandle;
use minigram::{AppState, config};

/// In-memory network with a handful of registered users
pub struct TestNetwork {
    pub state: AppState,
}

impl TestNetwork {
    /// Create an empty network with default configuration
    pub fn new() -> Self {
        Self::with_config(config::AppConfig::default())
    }

    /// Create an empty network with explicit configuration
    pub fn with_config(config: config::AppConfig) -> Self {
        let state = AppState::new(config).unwrap();
        Self { state }
    }

    /// Register a user with a valid password and a fixed city
    pub fn register(&mut self, username: &str) -> UserHandle {
        self.state
            .directory
            .register(username, "password1", "Testville")
            .unwrap()
    }

    /// Run the request/accept handshake between two users
    pub fn befriend(&mut self, requester: UserHandle, target: UserHandle) {
        self.state
            .directory
            .send_friend_request(requester, target)
            .unwrap();
        self.state
            .directory
            .accept_friend_requests(target)
            .unwrap();
    }

    /// Contents of a user's newsfeed, most recent first
    pub fn feed_contents(&self, user: UserHandle) -> Vec<String> {
        self.state
            .directory
            .newsfeed(user)
            .unwrap()
            .into_iter()
            .map(|post| post.content)
            .collect()
    }

    /// Contents of a user's own posts, most recent first
    pub fn post_contents(&self, user: UserHandle) -> Vec<String> {
        self.state
            .directory
            .own_posts(user)
            .unwrap()
            .into_iter()
            .map(|post| post.content)
            .collect()
    }

    /// Number of active outgoing edges from `owner` to `target`
    pub fn active_edges(&self, owner: UserHandle, target: UserHandle) -> usize {
        self.state
            .directory
            .user(owner)
            .unwrap()
            .friend_edges()
            .filter(|edge| edge.target == target && edge.is_active())
            .count()
    }
}

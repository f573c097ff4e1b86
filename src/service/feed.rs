//! Feed service
//!
//! Fan-out-on-write: a new post is pushed onto the author's history and
//! a copy onto the newsfeed of every user the author has an active edge
//! to at that moment. Later edge changes never add or remove copies.

use crate::data::{Directory, Post, UserHandle};
use crate::error::{AppError, Result};
use crate::metrics::{FEED_DELIVERIES_TOTAL, POSTS_TOTAL};

impl Directory {
    /// Publish a post from `author`
    ///
    /// # Errors
    /// - `AppError::TargetNotFound` if `author` is unknown
    /// - `AppError::Validation` if the content is blank
    pub fn add_post(&mut self, author: UserHandle, content: &str) -> Result<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("post content is required".to_string()).record());
        }

        let post = Post::new(content.to_string());
        let owner = self.resolve_mut(author)?;
        owner.posts.push(post.clone());

        let recipients: Vec<UserHandle> = owner
            .friend_edges()
            .filter(|edge| edge.is_active())
            .map(|edge| edge.target)
            .collect();

        let mut delivered = 0u64;
        for recipient in recipients {
            match self.resolve_mut(recipient) {
                Ok(friend) => {
                    friend.newsfeed.push(post.clone());
                    delivered += 1;
                }
                Err(_) => {
                    tracing::warn!(
                        recipient = recipient.index(),
                        "Skipping unknown feed recipient"
                    );
                }
            }
        }

        POSTS_TOTAL.inc();
        FEED_DELIVERIES_TOTAL.inc_by(delivered);
        tracing::debug!(
            author = %self.username(author),
            post_id = %post.id,
            delivered,
            "Post published"
        );

        Ok(post)
    }

    /// Posts written by `user`, most recent first
    pub fn own_posts(&self, user: UserHandle) -> Result<Vec<Post>> {
        Ok(self.resolve(user)?.posts.snapshot())
    }

    /// Posts delivered to `user` by friends, most recent first
    pub fn newsfeed(&self, user: UserHandle) -> Result<Vec<Post>> {
        Ok(self.resolve(user)?.newsfeed.snapshot())
    }
}

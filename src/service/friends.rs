//! Friend service
//!
//! The friend-request handshake. A request parks the requester in the
//! target's queue; accepting drains the whole queue and links each
//! requester in both directions. There is no per-request accept and no
//! reject.

use crate::data::{Directory, EdgeStatus, FriendEdge, FriendSummary, RelationType, UserHandle};
use crate::error::{AppError, Result};
use crate::metrics::FRIEND_REQUESTS_TOTAL;

/// Result of [`Directory::send_friend_request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequestOutcome {
    /// The request is pending in the target's queue
    Sent,
    /// The sender already has an active edge to the target; nothing queued
    AlreadyConnected,
}

impl Directory {
    /// Queue a friend request from `from` to `to`
    ///
    /// # Errors
    /// - `AppError::TargetNotFound` if either handle is unknown
    /// - `AppError::Validation` if `from` and `to` are the same user
    pub fn send_friend_request(
        &mut self,
        from: UserHandle,
        to: UserHandle,
    ) -> Result<FriendRequestOutcome> {
        let (sender, target) = self.pair_mut(from, to)?;

        if sender.has_active_edge(to) {
            FRIEND_REQUESTS_TOTAL
                .with_label_values(&["already_connected"])
                .inc();
            tracing::debug!(
                from = %sender.username(),
                to = %target.username(),
                "Friend request skipped, already connected"
            );
            return Ok(FriendRequestOutcome::AlreadyConnected);
        }

        target.friend_requests.enqueue(from);
        FRIEND_REQUESTS_TOTAL.with_label_values(&["sent"]).inc();
        tracing::info!(
            from = %sender.username(),
            to = %target.username(),
            "Friend request sent"
        );
        Ok(FriendRequestOutcome::Sent)
    }

    /// Accept every pending request for `user`, oldest first
    ///
    /// Each requester gets an active edge to `user` and back, plus a
    /// notification. Returns the requesters in the order they were
    /// accepted; an empty list means nothing was pending.
    ///
    /// # Errors
    /// `AppError::TargetNotFound` if `user` is unknown
    pub fn accept_friend_requests(&mut self, user: UserHandle) -> Result<Vec<UserHandle>> {
        let pending: Vec<UserHandle> = self
            .resolve_mut(user)?
            .friend_requests
            .drain()
            .collect();

        let mut accepted = Vec::with_capacity(pending.len());
        for requester in pending {
            // Handles only come from this directory; a request from self
            // cannot be queued.
            let Ok((owner, friend)) = self.pair_mut(user, requester) else {
                tracing::warn!(
                    requester = requester.index(),
                    "Dropping unresolvable friend request"
                );
                continue;
            };

            add_edge(owner, requester);
            add_edge(friend, user);
            friend.notifications.enqueue(format!(
                "Your friend request to {} has been accepted.",
                owner.username()
            ));

            FRIEND_REQUESTS_TOTAL.with_label_values(&["accepted"]).inc();
            tracing::info!(
                user = %owner.username(),
                friend = %friend.username(),
                "Friend request accepted"
            );
            accepted.push(requester);
        }

        Ok(accepted)
    }

    /// Requesters waiting on `user`, oldest first, without consuming them
    pub fn pending_friend_requests(&self, user: UserHandle) -> Result<Vec<UserHandle>> {
        Ok(self.resolve(user)?.friend_requests.iter().copied().collect())
    }

    /// Add an active edge from `owner` to `friend`
    ///
    /// An existing edge to the same user is re-activated rather than
    /// duplicated.
    pub fn add_friend(&mut self, owner: UserHandle, friend: UserHandle) -> Result<()> {
        let (owner, _) = self.pair_mut(owner, friend)?;
        add_edge(owner, friend);
        Ok(())
    }

    /// True if `owner` has any edge to `other`, whatever its status
    pub fn is_following(&self, owner: UserHandle, other: UserHandle) -> bool {
        self.user(owner)
            .is_some_and(|user| user.edge_to(other).is_some())
    }

    /// Change the status of the edge from `owner` to `target`
    ///
    /// # Errors
    /// `AppError::TargetNotFound` if `owner` is unknown or has no edge
    /// to `target`
    pub fn set_edge_status(
        &mut self,
        owner: UserHandle,
        target: UserHandle,
        status: EdgeStatus,
    ) -> Result<()> {
        let edge = self
            .resolve_mut(owner)?
            .edge_to_mut(target)
            .ok_or_else(|| AppError::TargetNotFound.record())?;
        edge.status = status;
        Ok(())
    }

    /// Outgoing edges of `user`, most recent first
    pub fn friends(&self, user: UserHandle) -> Result<Vec<FriendSummary>> {
        let owner = self.resolve(user)?;
        Ok(owner
            .friend_edges()
            .map(|edge| FriendSummary {
                handle: edge.target,
                username: self.username(edge.target).to_string(),
                status: edge.status,
            })
            .collect())
    }
}

fn add_edge(owner: &mut crate::data::User, target: UserHandle) {
    if let Some(edge) = owner.edge_to_mut(target) {
        edge.status = EdgeStatus::Active;
        return;
    }
    owner.friends.push(FriendEdge {
        target,
        relation: RelationType::Friend,
        status: EdgeStatus::Active,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Directory, UserHandle, UserHandle) {
        let mut directory = Directory::default();
        let alice = directory.register("alice", "bob123", "NY").unwrap();
        let bob = directory.register("bob", "secret9", "LA").unwrap();
        (directory, alice, bob)
    }

    #[test]
    fn request_is_pending_until_accepted() {
        let (mut directory, alice, bob) = setup();

        let outcome = directory.send_friend_request(alice, bob).unwrap();

        assert_eq!(outcome, FriendRequestOutcome::Sent);
        assert_eq!(directory.pending_friend_requests(bob).unwrap(), vec![alice]);
        assert!(!directory.is_following(alice, bob));
        assert!(!directory.is_following(bob, alice));
    }

    #[test]
    fn accept_links_both_directions_and_notifies() {
        let (mut directory, alice, bob) = setup();
        directory.send_friend_request(alice, bob).unwrap();

        let accepted = directory.accept_friend_requests(bob).unwrap();

        assert_eq!(accepted, vec![alice]);
        assert!(directory.user(alice).unwrap().has_active_edge(bob));
        assert!(directory.user(bob).unwrap().has_active_edge(alice));
        assert!(directory.pending_friend_requests(bob).unwrap().is_empty());
        assert_eq!(
            directory.take_notifications(alice).unwrap(),
            vec!["Your friend request to bob has been accepted.".to_string()]
        );
    }

    #[test]
    fn accept_with_nothing_pending_is_empty() {
        let (mut directory, _alice, bob) = setup();
        assert!(directory.accept_friend_requests(bob).unwrap().is_empty());
    }

    #[test]
    fn request_to_existing_friend_is_not_queued() {
        let (mut directory, alice, bob) = setup();
        directory.send_friend_request(alice, bob).unwrap();
        directory.accept_friend_requests(bob).unwrap();

        let outcome = directory.send_friend_request(alice, bob).unwrap();

        assert_eq!(outcome, FriendRequestOutcome::AlreadyConnected);
        assert!(directory.pending_friend_requests(bob).unwrap().is_empty());
    }

    #[test]
    fn request_to_self_is_rejected() {
        let (mut directory, alice, _bob) = setup();
        assert!(matches!(
            directory.send_friend_request(alice, alice),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn request_to_unknown_handle_fails() {
        let (mut directory, alice, _bob) = setup();
        let ghost = UserHandle(42);
        assert_eq!(
            directory.send_friend_request(alice, ghost).unwrap_err(),
            AppError::TargetNotFound
        );
    }

    #[test]
    fn add_friend_reactivates_instead_of_duplicating() {
        let (mut directory, alice, bob) = setup();
        directory.add_friend(alice, bob).unwrap();
        directory
            .set_edge_status(alice, bob, EdgeStatus::Inactive)
            .unwrap();
        assert!(!directory.user(alice).unwrap().has_active_edge(bob));

        directory.add_friend(alice, bob).unwrap();

        let friends = directory.friends(alice).unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].status, EdgeStatus::Active);
        assert_eq!(friends[0].username, "bob");
    }

    #[test]
    fn friends_are_listed_most_recent_first() {
        let (mut directory, alice, bob) = setup();
        let carol = directory.register("carol", "secret9", "SF").unwrap();
        directory.add_friend(alice, bob).unwrap();
        directory.add_friend(alice, carol).unwrap();

        let names: Vec<String> = directory
            .friends(alice)
            .unwrap()
            .into_iter()
            .map(|summary| summary.username)
            .collect();
        assert_eq!(names, vec!["carol", "bob"]);
    }

    #[test]
    fn set_edge_status_without_edge_fails() {
        let (mut directory, alice, bob) = setup();
        assert_eq!(
            directory
                .set_edge_status(alice, bob, EdgeStatus::Inactive)
                .unwrap_err(),
            AppError::TargetNotFound
        );
    }
}

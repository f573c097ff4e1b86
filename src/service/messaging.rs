//! Messaging service
//!
//! Direct messages and notifications. Each side of a conversation keeps
//! its own message history; sending writes to both and notifies the
//! recipient. Permission is one-directional: the sender needs an active
//! edge to the recipient, not the other way round.

use crate::data::{Directory, UserHandle};
use crate::error::{AppError, Result};
use crate::metrics::MESSAGES_TOTAL;

impl Directory {
    /// Send `text` from `from` to `to`
    ///
    /// # Errors
    /// - `AppError::NotPermitted` without an active edge from `from` to `to`
    /// - `AppError::TargetNotFound` if either handle is unknown
    pub fn send_message(&mut self, from: UserHandle, to: UserHandle, text: &str) -> Result<()> {
        self.resolve(to)?;
        let sender = self.resolve(from)?;
        if !sender.has_active_edge(to) {
            tracing::debug!(
                from = %sender.username(),
                to = %self.username(to),
                "Message refused, no active connection"
            );
            return Err(AppError::NotPermitted.record());
        }

        let (sender, recipient) = self.pair_mut(from, to)?;
        sender
            .conversation_with_mut(to)
            .messages
            .push(format!("You: {text}"));
        recipient
            .conversation_with_mut(from)
            .messages
            .push(format!("{}: {text}", sender.username()));
        recipient
            .notifications
            .enqueue(format!("New message from {}", sender.username()));

        MESSAGES_TOTAL.inc();
        tracing::debug!(
            from = %sender.username(),
            to = %recipient.username(),
            "Message delivered"
        );
        Ok(())
    }

    /// Lines exchanged between `user` and `peer`, most recent first
    ///
    /// Empty when the two have never exchanged a message.
    pub fn messages(&self, user: UserHandle, peer: UserHandle) -> Result<Vec<String>> {
        Ok(self
            .resolve(user)?
            .conversation_with(peer)
            .map(|conversation| conversation.messages.snapshot())
            .unwrap_or_default())
    }

    /// Peers `user` has a conversation with, most recently started first
    pub fn conversation_peers(&self, user: UserHandle) -> Result<Vec<UserHandle>> {
        Ok(self
            .resolve(user)?
            .conversations
            .iter()
            .rev()
            .map(|conversation| conversation.peer)
            .collect())
    }

    /// Queue a notification for `user`
    pub fn add_notification(&mut self, user: UserHandle, text: impl Into<String>) -> Result<()> {
        self.resolve_mut(user)?.notifications.enqueue(text.into());
        Ok(())
    }

    /// Remove and return every notification for `user`, oldest first
    pub fn take_notifications(&mut self, user: UserHandle) -> Result<Vec<String>> {
        Ok(self.resolve_mut(user)?.notifications.drain().collect())
    }

    /// Number of unread notifications for `user`
    pub fn notification_count(&self, user: UserHandle) -> Result<usize> {
        Ok(self.resolve(user)?.notifications.len())
    }
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
    fn message_requires_outgoing_edge() {
        let (mut directory, alice, bob) = setup();
        directory.add_friend(bob, alice).unwrap();

        assert_eq!(
            directory.send_message(alice, bob, "hi").unwrap_err(),
            AppError::NotPermitted
        );
        assert!(directory.messages(alice, bob).unwrap().is_empty());
        assert_eq!(directory.notification_count(bob).unwrap(), 0);
    }

    #[test]
    fn message_to_unknown_user_is_target_not_found() {
        let (mut directory, alice, _bob) = setup();

        assert_eq!(
            directory.send_message(alice, UserHandle(99), "hi"),
            Err(AppError::TargetNotFound)
        );
        assert_eq!(
            directory.send_message(UserHandle(99), alice, "hi"),
            Err(AppError::TargetNotFound)
        );
        assert!(directory.conversation_peers(alice).unwrap().is_empty());
    }

    #[test]
    fn one_directional_edge_is_enough() {
        let (mut directory, alice, bob) = setup();
        directory.add_friend(alice, bob).unwrap();

        directory.send_message(alice, bob, "hi").unwrap();

        assert_eq!(directory.messages(alice, bob).unwrap(), vec!["You: hi"]);
        assert_eq!(directory.messages(bob, alice).unwrap(), vec!["alice: hi"]);
        assert_eq!(
            directory.take_notifications(bob).unwrap(),
            vec!["New message from alice"]
        );
    }

    #[test]
    fn each_side_keeps_its_own_history() {
        let (mut directory, alice, bob) = setup();
        directory.add_friend(alice, bob).unwrap();
        directory.add_friend(bob, alice).unwrap();

        directory.send_message(alice, bob, "hello").unwrap();
        directory.send_message(bob, alice, "hey").unwrap();
        directory.send_message(alice, bob, "how are you").unwrap();

        assert_eq!(
            directory.messages(alice, bob).unwrap(),
            vec!["You: how are you", "bob: hey", "You: hello"]
        );
        assert_eq!(
            directory.messages(bob, alice).unwrap(),
            vec!["alice: how are you", "You: hey", "alice: hello"]
        );
    }

    #[test]
    fn notifications_are_consumed_in_fifo_order() {
        let (mut directory, alice, _bob) = setup();
        directory.add_notification(alice, "first").unwrap();
        directory.add_notification(alice, "second".to_string()).unwrap();

        assert_eq!(directory.notification_count(alice).unwrap(), 2);
        assert_eq!(
            directory.take_notifications(alice).unwrap(),
            vec!["first", "second"]
        );
        assert!(directory.take_notifications(alice).unwrap().is_empty());
    }

    #[test]
    fn conversation_peers_lists_newest_first() {
        let (mut directory, alice, bob) = setup();
        let carol = directory.register("carol", "secret9", "SF").unwrap();
        directory.add_friend(alice, bob).unwrap();
        directory.add_friend(alice, carol).unwrap();

        directory.send_message(alice, bob, "a").unwrap();
        directory.send_message(alice, carol, "b").unwrap();
        directory.send_message(alice, bob, "c").unwrap();

        assert_eq!(directory.conversation_peers(alice).unwrap(), vec![carol, bob]);
        assert_eq!(directory.conversation_peers(bob).unwrap(), vec![alice]);
    }
}

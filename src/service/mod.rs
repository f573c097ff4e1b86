//! Service layer
//!
//! Social-graph operations on the [`Directory`](crate::data::Directory):
//! login, the friend-request handshake, post fan-out, messaging and
//! notifications. Every operation takes resolved user handles.

mod account;
mod feed;
mod friends;
mod messaging;

pub use account::LoginAttempt;
pub use friends::FriendRequestOutcome;

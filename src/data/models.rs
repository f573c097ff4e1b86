//! Data models
//!
//! Account records and the values stored in their per-user containers.
//! Posts use ULID for IDs and chrono for timestamps.

use chrono::{DateTime, Utc};

use super::queue::Queue;
use super::stack::Stack;

// =============================================================================
// Handles
// =============================================================================

/// Opaque reference to a user owned by the [`Directory`](super::Directory)
///
/// Handles are minted only by the directory at registration and index
/// its master list. Friend edges and conversations hold handles, never
/// owned users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserHandle(pub(crate) usize);

impl UserHandle {
    /// Position in the directory's master list
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Post
// =============================================================================

/// A post, immutable once created
///
/// Newsfeed entries are independent copies of the author's post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// ULID, 26 characters
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
}

impl Post {
    pub(crate) fn new(content: String) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            created_at: Utc::now(),
            content,
        }
    }
}

// =============================================================================
// Friend edges
// =============================================================================

/// Kind of relationship an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    Friend,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friend => "friend",
        }
    }
}

/// Edge status. Only active edges receive posts and allow messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    Active,
    Inactive,
}

impl EdgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Directed edge from the owning user to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendEdge {
    pub target: UserHandle,
    pub relation: RelationType,
    pub status: EdgeStatus,
}

impl FriendEdge {
    pub fn is_active(&self) -> bool {
        self.status == EdgeStatus::Active
    }
}

/// Display row for a user's friend list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendSummary {
    pub handle: UserHandle,
    pub username: String,
    pub status: EdgeStatus,
}

// =============================================================================
// Conversations
// =============================================================================

/// One user's half of an exchange with `peer`
///
/// Holds both sent and received lines, each tagged with its sender.
#[derive(Debug)]
pub struct Conversation {
    pub peer: UserHandle,
    pub(crate) messages: Stack<String>,
}

impl Conversation {
    pub(crate) fn new(peer: UserHandle) -> Self {
        Self {
            peer,
            messages: Stack::new(),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// An account and everything it owns
///
/// Edge and conversation lists are kept oldest first; views that show
/// the most recent first iterate them in reverse.
#[derive(Debug)]
pub struct User {
    username: String,
    /// Stored and compared in plaintext
    password: String,
    city: String,
    last_login: DateTime<Utc>,
    pub(crate) posts: Stack<Post>,
    pub(crate) newsfeed: Stack<Post>,
    pub(crate) friends: Vec<FriendEdge>,
    pub(crate) friend_requests: Queue<UserHandle>,
    pub(crate) conversations: Vec<Conversation>,
    pub(crate) notifications: Queue<String>,
}

impl User {
    pub(crate) fn new(username: String, password: String, city: String) -> Self {
        Self {
            username,
            password,
            city,
            last_login: Utc::now(),
            posts: Stack::new(),
            newsfeed: Stack::new(),
            friends: Vec::new(),
            friend_requests: Queue::new(),
            conversations: Vec::new(),
            notifications: Queue::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Set at creation and refreshed on every successful login
    pub fn last_login(&self) -> DateTime<Utc> {
        self.last_login
    }

    pub(crate) fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub(crate) fn touch_login(&mut self) {
        self.last_login = Utc::now();
    }

    /// Outgoing edge to `target`, if one exists
    pub fn edge_to(&self, target: UserHandle) -> Option<&FriendEdge> {
        self.friends.iter().find(|edge| edge.target == target)
    }

    pub(crate) fn edge_to_mut(&mut self, target: UserHandle) -> Option<&mut FriendEdge> {
        self.friends.iter_mut().find(|edge| edge.target == target)
    }

    /// True when an active outgoing edge to `target` exists
    pub fn has_active_edge(&self, target: UserHandle) -> bool {
        self.edge_to(target).is_some_and(FriendEdge::is_active)
    }

    /// Outgoing edges, most recent first
    pub fn friend_edges(&self) -> impl Iterator<Item = &FriendEdge> {
        self.friends.iter().rev()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn newsfeed_len(&self) -> usize {
        self.newsfeed.len()
    }

    pub(crate) fn conversation_with(&self, peer: UserHandle) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.peer == peer)
    }

    /// Conversation with `peer`, created if absent
    pub(crate) fn conversation_with_mut(&mut self, peer: UserHandle) -> &mut Conversation {
        let position = match self.conversations.iter().position(|c| c.peer == peer) {
            Some(position) => position,
            None => {
                self.conversations.push(Conversation::new(peer));
                self.conversations.len() - 1
            }
        };
        &mut self.conversations[position]
    }
}

//! Data layer module
//!
//! Hand-rolled containers and the account indexes:
//! - Stack and Queue for per-user histories and inboxes
//! - Username hash index and ordered index
//! - The directory that owns every user

mod hash_index;
mod models;
mod ordered_index;
mod queue;
mod registry;
mod stack;

pub use hash_index::UserDirectory;
pub use models::*;
pub use ordered_index::{Inorder, UserIndex};
pub use queue::Queue;
pub use registry::Directory;
pub use stack::Stack;

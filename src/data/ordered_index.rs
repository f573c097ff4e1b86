//! Ordered username index
//!
//! Unbalanced binary search tree used to enumerate accounts in sorted
//! order. Nodes sit in an arena and refer to their children by index.
//! There is no rebalancing, so monotonic insert orders degrade the tree
//! into a list; every walk is iterative so depth never touches the call
//! stack.

use super::models::UserHandle;

struct Node {
    username: String,
    user: UserHandle,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree keyed by username, ascending lexicographic order
#[derive(Default)]
pub struct UserIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl UserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a username. Equal keys descend to the right.
    pub fn insert(&mut self, username: &str, user: UserHandle) {
        let slot = self.nodes.len();
        self.nodes.push(Node {
            username: username.to_string(),
            user,
            left: None,
            right: None,
        });

        let Some(mut current) = self.root else {
            self.root = Some(slot);
            return;
        };

        loop {
            let node = &mut self.nodes[current];
            let child = if username < node.username.as_str() {
                &mut node.left
            } else {
                &mut node.right
            };
            match *child {
                Some(next) => current = next,
                None => {
                    *child = Some(slot);
                    return;
                }
            }
        }
    }

    /// Find the handle stored for `username`
    pub fn search(&self, username: &str) -> Option<UserHandle> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            if username == node.username {
                return Some(node.user);
            }
            current = if username < node.username.as_str() {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Usernames in ascending order
    ///
    /// Lazy and restartable: calling it again walks the same tree from
    /// the start.
    pub fn inorder(&self) -> Inorder<'_> {
        let mut walk = Inorder {
            index: self,
            pending: Vec::new(),
        };
        walk.descend_left(self.root);
        walk
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(usize, usize)> =
            self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[index];
            pending.extend(node.left.map(|left| (left, depth + 1)));
            pending.extend(node.right.map(|right| (right, depth + 1)));
        }
        tallest
    }
}

/// In-order iterator returned by [`UserIndex::inorder`]
pub struct Inorder<'a> {
    index: &'a UserIndex,
    pending: Vec<usize>,
}

impl Inorder<'_> {
    fn descend_left(&mut self, mut current: Option<usize>) {
        while let Some(index) = current {
            self.pending.push(index);
            current = self.index.nodes[index].left;
        }
    }
}

impl<'a> Iterator for Inorder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.pending.pop()?;
        let node = &self.index.nodes[index];
        self.descend_left(node.right);
        Some(node.username.as_str())
    }
}

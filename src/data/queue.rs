//! Singly linked FIFO queue
//!
//! Backs friend-request inboxes and notification inboxes. Nodes live in
//! an arena and link to each other by slot index, which lets the queue
//! keep both a head and a tail without shared mutable pointers. Freed
//! slots are recycled through a free list.

use crate::error::AppError;

struct Node<T> {
    value: Option<T>,
    next: Option<usize>,
}

/// FIFO container with O(1) enqueue and dequeue
pub struct Queue<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    front: Option<usize>,
    rear: Option<usize>,
    len: usize,
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            front: None,
            rear: None,
            len: 0,
        }
    }

    /// Append a value at the tail. O(1) amortized.
    pub fn enqueue(&mut self, value: T) {
        let node = Node {
            value: Some(value),
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        match self.rear {
            Some(rear) => self.nodes[rear].next = Some(slot),
            None => self.front = Some(slot),
        }
        self.rear = Some(slot);
        self.len += 1;
    }

    /// Remove and return the earliest enqueued value. O(1).
    ///
    /// # Errors
    /// `AppError::EmptyContainer` when the queue holds nothing
    pub fn dequeue(&mut self) -> Result<T, AppError> {
        let slot = self.front.ok_or(AppError::EmptyContainer)?;
        let node = &mut self.nodes[slot];
        let value = node.value.take().ok_or(AppError::EmptyContainer)?;

        self.front = node.next.take();
        if self.front.is_none() {
            self.rear = None;
        }
        self.free.push(slot);
        self.len -= 1;
        Ok(value)
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Release every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.front = None;
        self.rear = None;
        self.len = 0;
    }

    /// Visit every value front to back without consuming the queue
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Iterate front to back without consuming the queue
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            cursor: self.front,
        }
    }

    /// Dequeue every value, front first
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { queue: self }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a `Queue`, front first
pub struct Iter<'a, T> {
    queue: &'a Queue<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        node.value.as_ref()
    }
}

/// Draining iterator returned by [`Queue::drain`]
pub struct Drain<'a, T> {
    queue: &'a mut Queue<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue().ok()
    }
}

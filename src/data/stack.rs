//! Singly linked LIFO stack
//!
//! Backs post history, newsfeed history and conversation history.
//! Cloning copies every node, so a clone can be drained for display
//! without touching the original.

use crate::error::AppError;

struct Node<T> {
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// LIFO container built from owned, singly linked nodes
pub struct Stack<T> {
    top: Link<T>,
    len: usize,
}

impl<T> Stack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { top: None, len: 0 }
    }

    /// Prepend a value. O(1).
    pub fn push(&mut self, value: T) {
        let next = self.top.take();
        self.top = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Remove and return the most recently pushed value. O(1).
    ///
    /// # Errors
    /// `AppError::EmptyContainer` when the stack holds nothing
    pub fn pop(&mut self) -> Result<T, AppError> {
        let node = self.top.take().ok_or(AppError::EmptyContainer)?;
        let Node { value, next } = *node;
        self.top = next;
        self.len -= 1;
        Ok(value)
    }

    /// Most recently pushed value, if any
    pub fn peek(&self) -> Option<&T> {
        self.top.as_deref().map(|node| &node.value)
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterate from the top of the stack down without consuming it
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }
}

impl<T: Clone> Stack<T> {
    /// Clone the stack and pop every value from the copy
    ///
    /// Yields values most recent first and leaves `self` intact.
    pub fn snapshot(&self) -> Vec<T> {
        let mut copy = self.clone();
        let mut values = Vec::with_capacity(copy.len());
        while let Ok(value) = copy.pop() {
            values.push(value);
        }
        values
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        // Rebuild bottom-up so the copy keeps the original order.
        let values: Vec<&T> = self.iter().collect();
        let mut copy = Stack::new();
        for value in values.into_iter().rev() {
            copy.push(value.clone());
        }
        copy
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut link = self.top.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a `Stack`, top first
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_returns_values_in_lifo_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack: Stack<String> = Stack::new();
        assert_eq!(stack.pop(), Err(AppError::EmptyContainer));
        assert!(stack.peek().is_none());
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut original = Stack::new();
        original.push("a".to_string());
        original.push("b".to_string());

        let mut copy = original.clone();
        assert_eq!(copy.pop(), Ok("b".to_string()));
        copy.push("c".to_string());

        assert_eq!(original.len(), 2);
        assert_eq!(original.peek(), Some(&"b".to_string()));
        assert_eq!(
            original.iter().cloned().collect::<Vec<_>>(),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn snapshot_leaves_original_intact() {
        let mut stack = Stack::new();
        stack.push("first");
        stack.push("second");

        assert_eq!(stack.snapshot(), vec!["second", "first"]);
        assert_eq!(stack.snapshot(), vec!["second", "first"]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn dropping_a_long_stack_does_not_overflow() {
        let mut stack = Stack::new();
        for i in 0..200_000 {
            stack.push(i);
        }
        drop(stack);
    }
}

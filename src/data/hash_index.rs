//! Username hash index
//!
//! Chained hash table from username to user handle, used for login and
//! lookup. The hash is the byte sum of the username modulo the bucket
//! count. It is cheap and collides easily; chaining keeps lookups
//! correct regardless.

use super::models::UserHandle;

struct Entry {
    username: String,
    user: UserHandle,
    next: Option<Box<Entry>>,
}

/// Chained hash table keyed by username
pub struct UserDirectory {
    buckets: Vec<Option<Box<Entry>>>,
    len: usize,
}

impl UserDirectory {
    /// Default number of buckets
    pub const DEFAULT_BUCKETS: usize = 100;

    /// Create a directory with `bucket_count` buckets (at least one)
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Self { buckets, len: 0 }
    }

    /// Bucket index for a username
    pub fn hash(&self, username: &str) -> usize {
        let sum: usize = username.bytes().map(usize::from).sum();
        sum % self.buckets.len()
    }

    /// Prepend an entry to its bucket chain
    ///
    /// Does not look for an existing entry with the same username; the
    /// registry checks `search` first.
    pub fn insert(&mut self, username: &str, user: UserHandle) {
        let index = self.hash(username);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry {
            username: username.to_string(),
            user,
            next,
        }));
        self.len += 1;
    }

    /// Find the handle stored for `username`
    pub fn search(&self, username: &str) -> Option<UserHandle> {
        let mut current = self.buckets[self.hash(username)].as_deref();
        while let Some(entry) = current {
            if entry.username == username {
                return Some(entry.user);
            }
            current = entry.next.as_deref();
        }
        None
    }

    /// Number of entries across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Chain length of one bucket, zero for an out-of-range index
    pub fn bucket_len(&self, index: usize) -> usize {
        let mut count = 0;
        let mut current = self.buckets.get(index).and_then(|bucket| bucket.as_deref());
        while let Some(entry) = current {
            count += 1;
            current = entry.next.as_deref();
        }
        count
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKETS)
    }
}

impl Drop for UserDirectory {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut link = bucket.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
    }
}

//! Directory registry
//!
//! Sole owner of every `User`. Keeps the master list, the username hash
//! index and the ordered index in step: a user is inserted into all
//! three or none.

use super::hash_index::UserDirectory;
use super::models::{User, UserHandle};
use super::ordered_index::UserIndex;
use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Process root for accounts
pub struct Directory {
    users: Vec<User>,
    by_name: UserDirectory,
    sorted: UserIndex,
    min_password_len: usize,
    max_login_attempts: u32,
}

impl Directory {
    /// Create an empty directory sized and ruled by `config`
    pub fn new(config: &AppConfig) -> Self {
        Self {
            users: Vec::new(),
            by_name: UserDirectory::new(config.directory.bucket_count),
            sorted: UserIndex::new(),
            min_password_len: config.auth.min_password_len,
            max_login_attempts: config.auth.max_login_attempts,
        }
    }

    /// Create an account
    ///
    /// # Errors
    /// - `AppError::UsernameTaken` if the username is registered
    /// - `AppError::Validation` for an empty username, a username with
    ///   whitespace, or a password shorter than the configured minimum
    pub fn register(&mut self, username: &str, password: &str, city: &str) -> Result<UserHandle> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "username must be non-empty and contain no whitespace".to_string(),
            )
            .record());
        }

        if self.by_name.search(username).is_some() {
            tracing::debug!(username = %username, "Signup rejected, username taken");
            return Err(AppError::UsernameTaken.record());
        }

        if password.chars().count() < self.min_password_len {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                self.min_password_len
            ))
            .record());
        }

        let handle = UserHandle(self.users.len());
        self.users.push(User::new(
            username.to_string(),
            password.to_string(),
            city.trim().to_string(),
        ));
        self.by_name.insert(username, handle);
        self.sorted.insert(username, handle);

        use crate::metrics::USERS_TOTAL;
        USERS_TOTAL.inc();

        tracing::info!(username = %username, city = %city.trim(), "Account created");
        Ok(handle)
    }

    /// Resolve a username through the hash index
    pub fn lookup(&self, username: &str) -> Option<UserHandle> {
        self.by_name.search(username)
    }

    /// Resolve a username through the ordered index
    pub fn search_sorted(&self, username: &str) -> Option<UserHandle> {
        self.sorted.search(username)
    }

    /// Every username in ascending order
    pub fn list_all_sorted(&self) -> Vec<String> {
        self.sorted.inorder().map(str::to_string).collect()
    }

    /// Read access to a user
    pub fn user(&self, handle: UserHandle) -> Option<&User> {
        self.users.get(handle.0)
    }

    /// Username behind a handle, empty for an unknown handle
    pub fn username(&self, handle: UserHandle) -> &str {
        self.user(handle).map(User::username).unwrap_or_default()
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub(crate) fn max_login_attempts(&self) -> u32 {
        self.max_login_attempts
    }

    /// Shared access to a user; unknown handles are counted as errors
    pub(crate) fn resolve(&self, handle: UserHandle) -> Result<&User> {
        self.users
            .get(handle.0)
            .ok_or_else(|| AppError::TargetNotFound.record())
    }

    pub(crate) fn resolve_mut(&mut self, handle: UserHandle) -> Result<&mut User> {
        self.users
            .get_mut(handle.0)
            .ok_or_else(|| AppError::TargetNotFound.record())
    }

    /// Mutable access to two distinct users at once
    ///
    /// # Errors
    /// - `AppError::TargetNotFound` if either handle is unknown
    /// - `AppError::Validation` if both handles name the same user
    pub(crate) fn pair_mut(
        &mut self,
        first: UserHandle,
        second: UserHandle,
    ) -> Result<(&mut User, &mut User)> {
        if first == second {
            return Err(AppError::Validation(
                "an account cannot interact with itself".to_string(),
            )
            .record());
        }
        let len = self.users.len();
        if first.0 >= len || second.0 >= len {
            return Err(AppError::TargetNotFound.record());
        }

        if first.0 < second.0 {
            let (low, high) = self.users.split_at_mut(second.0);
            Ok((&mut low[first.0], &mut high[0]))
        } else {
            let (low, high) = self.users.split_at_mut(first.0);
            Ok((&mut high[0], &mut low[second.0]))
        }
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

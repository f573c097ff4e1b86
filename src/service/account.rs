//! Account service
//!
//! Password checks and the attempt-limited login flow. Passwords are
//! compared in plaintext.

use crate::data::{Directory, UserHandle};
use crate::error::{AppError, Result};
use crate::metrics::LOGIN_ATTEMPTS_TOTAL;

impl Directory {
    /// Single password check for `username`
    ///
    /// Refreshes the user's last login time on success.
    ///
    /// # Errors
    /// - `AppError::UserNotFound` for an unknown username
    /// - `AppError::InvalidCredentials` for a wrong password
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<UserHandle> {
        let handle = LoginAttempt::start(self, username, 1)?.user;
        if check_password(self, handle, password)? {
            Ok(handle)
        } else {
            Err(AppError::InvalidCredentials { remaining: None }.record())
        }
    }

    /// Start a login for `username` that allows the configured number
    /// of consecutive wrong passwords
    ///
    /// # Errors
    /// `AppError::UserNotFound` for an unknown username
    pub fn begin_login(&self, username: &str) -> Result<LoginAttempt> {
        LoginAttempt::start(self, username, self.max_login_attempts())
    }
}

/// Compare `password` with the stored one, refreshing the last login
/// time on a match
fn check_password(directory: &mut Directory, handle: UserHandle, password: &str) -> Result<bool> {
    let user = directory.resolve_mut(handle)?;
    if user.password_matches(password) {
        user.touch_login();
        LOGIN_ATTEMPTS_TOTAL.with_label_values(&["success"]).inc();
        tracing::info!(username = %user.username(), "Login successful");
        return Ok(true);
    }

    LOGIN_ATTEMPTS_TOTAL.with_label_values(&["failure"]).inc();
    tracing::warn!(username = %user.username(), "Incorrect password");
    Ok(false)
}

/// One login in progress
///
/// Counts consecutive failures; once the limit is reached every further
/// call fails with `AppError::TooManyAttempts`.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    user: UserHandle,
    failures: u32,
    max_attempts: u32,
}

impl LoginAttempt {
    fn start(directory: &Directory, username: &str, max_attempts: u32) -> Result<Self> {
        let Some(user) = directory.lookup(username) else {
            tracing::debug!(username = %username, "Login for unknown user");
            LOGIN_ATTEMPTS_TOTAL.with_label_values(&["unknown_user"]).inc();
            return Err(AppError::UserNotFound.record());
        };

        Ok(Self {
            user,
            failures: 0,
            max_attempts: max_attempts.max(1),
        })
    }

    /// The account this login targets
    pub fn user(&self) -> UserHandle {
        self.user
    }

    /// Password checks left before lockout
    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failures)
    }

    pub fn is_locked(&self) -> bool {
        self.remaining() == 0
    }

    /// Check one password
    ///
    /// # Errors
    /// - `AppError::InvalidCredentials` while attempts remain
    /// - `AppError::TooManyAttempts` on the failure that exhausts them,
    ///   and on every call after
    pub fn try_password(
        &mut self,
        directory: &mut Directory,
        password: &str,
    ) -> Result<UserHandle> {
        if self.is_locked() {
            return Err(AppError::TooManyAttempts.record());
        }

        if check_password(directory, self.user, password)? {
            self.failures = 0;
            return Ok(self.user);
        }

        self.failures += 1;
        if self.is_locked() {
            tracing::warn!(
                username = %directory.username(self.user),
                failures = self.failures,
                "Login locked out after repeated failures"
            );
            return Err(AppError::TooManyAttempts.record());
        }

        Err(AppError::InvalidCredentials {
            remaining: Some(self.remaining()),
        }
        .record())
    }
}

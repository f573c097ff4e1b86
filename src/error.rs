//! Error types for Minigram
//!
//! Every fallible core operation returns `AppError`. None of the
//! variants is fatal; the shell turns each one into a message and
//! re-prompts.

use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Registration with a username that already exists
    #[error("Username already exists")]
    UsernameTaken,

    /// Lookup or login for a username that was never registered
    #[error("User not found")]
    UserNotFound,

    /// A handle that does not resolve to a registered user
    #[error("Target user not found")]
    TargetNotFound,

    /// Wrong password. `remaining` is set only inside an attempt-limited
    /// login and counts the checks left before lockout.
    #[error("Incorrect password{}", remaining_suffix(.remaining))]
    InvalidCredentials { remaining: Option<u32> },

    /// The login attempt is locked out after consecutive failures
    #[error("Too many failed attempts")]
    TooManyAttempts,

    /// Pop or dequeue on an empty container
    #[error("Container is empty")]
    EmptyContainer,

    /// Messaging a user without an active connection to them
    #[error("You can only message your friends")]
    NotPermitted,

    /// Rejected input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable label for metrics and structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::UsernameTaken => "username_taken",
            AppError::UserNotFound => "user_not_found",
            AppError::TargetNotFound => "target_not_found",
            AppError::InvalidCredentials { .. } => "invalid_credentials",
            AppError::TooManyAttempts => "too_many_attempts",
            AppError::EmptyContainer => "empty_container",
            AppError::NotPermitted => "not_permitted",
            AppError::Validation(_) => "validation",
            AppError::Config(_) => "config",
        }
    }

    /// Count this error in the error metric and hand it back
    pub(crate) fn record(self) -> Self {
        use crate::metrics::ERRORS_TOTAL;
        ERRORS_TOTAL.with_label_values(&[self.error_type()]).inc();
        self
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

fn remaining_suffix(remaining: &Option<u32>) -> String {
    match remaining {
        Some(count) => format!(" ({count} attempts remaining)"),
        None => String::new(),
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_type_labels_are_snake_case() {
        let errors = [
            AppError::UsernameTaken,
            AppError::UserNotFound,
            AppError::TargetNotFound,
            AppError::InvalidCredentials { remaining: Some(2) },
            AppError::TooManyAttempts,
            AppError::EmptyContainer,
            AppError::NotPermitted,
            AppError::Validation("bad".to_string()),
            AppError::Config("bad".to_string()),
        ];

        for error in errors {
            let label = error.error_type();
            assert!(label.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn invalid_credentials_message_includes_remaining_attempts() {
        let error = AppError::InvalidCredentials { remaining: Some(1) };
        assert_eq!(error.to_string(), "Incorrect password (1 attempts remaining)");
    }

    #[test]
    fn single_check_failure_does_not_mention_attempts() {
        let error = AppError::InvalidCredentials { remaining: None };
        assert_eq!(error.to_string(), "Incorrect password");
    }
}

//! Minigram - an in-memory social network simulation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Shell (binary, inquire)                    │
//! │  - Signup / login prompts                                   │
//! │  - Menu actions, rendering                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Login with attempt limit                                 │
//! │  - Friend-request handshake                                 │
//! │  - Post fan-out, messaging, notifications                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - Directory (master list + hash index + ordered index)     │
//! │  - Stack / Queue containers                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All state is volatile and lives only as long as the `AppState`.
//!
//! # Modules
//!
//! - `data`: Containers, indexes and the user directory
//! - `service`: Social-graph operations
//! - `config`: Configuration management
//! - `metrics`: Prometheus instruments
//! - `error`: Error types

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

/// Application root
///
/// Owns the single user directory. The shell holds one of these and
/// passes it by reference to every operation.
pub struct AppState {
    /// Application configuration
    pub config: config::AppConfig,

    /// Every account and its social state
    pub directory: data::Directory,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Errors
    /// Returns error if the configuration is invalid
    pub fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        config.validate()?;

        let directory = data::Directory::new(&config);
        tracing::info!(
            buckets = config.directory.bucket_count,
            max_login_attempts = config.auth.max_login_attempts,
            "Directory initialized"
        );

        Ok(Self { config, directory })
    }
}

//! Minigram binary entry point

mod shell;

use minigram::{AppState, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Load configuration from file and environment
/// 2. Initialize tracing/logging
/// 3. Initialize metrics
/// 4. Initialize AppState
/// 5. Run the interactive shell until the user exits
fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let config = config::AppConfig::load()?;

    // 2. Initialize tracing/logging
    init_tracing(&config.logging);
    tracing::info!("Starting Minigram...");

    // 3. Initialize metrics
    minigram::metrics::init_metrics();

    // 4. Initialize application state
    let mut state = AppState::new(config)?;

    // 5. Run the shell
    shell::run(&mut state)?;

    tracing::debug!(metrics = %minigram::metrics::render(), "Session metrics");
    tracing::info!(users = state.directory.len(), "Minigram stopped");
    Ok(())
}

fn init_tracing(logging: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("minigram={}", logging.level).into());

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

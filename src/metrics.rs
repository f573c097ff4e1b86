//! Prometheus metrics registry and instruments.
//!
//! Instruments are process-wide and usable before `init_metrics` is
//! called; registering only makes them visible to `render`.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Account Metrics
    pub static ref USERS_TOTAL: IntGauge = IntGauge::new(
        "minigram_users_total",
        "Total number of registered users"
    ).expect("metric can be created");
    pub static ref LOGIN_ATTEMPTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("minigram_login_attempts_total", "Total number of password checks"),
        &["result"]
    ).expect("metric can be created");

    // Social Graph Metrics
    pub static ref FRIEND_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("minigram_friend_requests_total", "Total number of friend requests by outcome"),
        &["outcome"]
    ).expect("metric can be created");

    // Feed Metrics
    pub static ref POSTS_TOTAL: IntCounter = IntCounter::new(
        "minigram_posts_total",
        "Total number of posts created"
    ).expect("metric can be created");
    pub static ref FEED_DELIVERIES_TOTAL: IntCounter = IntCounter::new(
        "minigram_feed_deliveries_total",
        "Total number of post copies pushed into newsfeeds"
    ).expect("metric can be created");

    // Messaging Metrics
    pub static ref MESSAGES_TOTAL: IntCounter = IntCounter::new(
        "minigram_messages_total",
        "Total number of direct messages sent"
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("minigram_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
///
/// Call once per process; a second registration of the same collector
/// fails and is logged instead of aborting.
pub fn init_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 7] = [
        Box::new(USERS_TOTAL.clone()),
        Box::new(LOGIN_ATTEMPTS_TOTAL.clone()),
        Box::new(FRIEND_REQUESTS_TOTAL.clone()),
        Box::new(POSTS_TOTAL.clone()),
        Box::new(FEED_DELIVERIES_TOTAL.clone()),
        Box::new(MESSAGES_TOTAL.clone()),
        Box::new(ERRORS_TOTAL.clone()),
    ];

    for collector in collectors {
        if let Err(error) = REGISTRY.register(collector) {
            tracing::warn!(%error, "Failed to register metric");
        }
    }

    tracing::info!("Metrics registry initialized");
}

/// Encode all registered metrics in the Prometheus text format
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!(%error, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_registered_metrics() {
        init_metrics();
        POSTS_TOTAL.inc();

        let text = render();
        assert!(text.contains("minigram_posts_total"));
    }
}

//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with a uniform
//! request timeout.

use std::time::Duration;

/// Build a `reqwest::Client` with the given request timeout in seconds.
///
/// A slow model call that never returns is bounded here; nothing above the
/// provider adapter applies its own timeout.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("failed to build reqwest client")
}

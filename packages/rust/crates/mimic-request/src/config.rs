//! Pipeline settings: retry bound, per-attempt timeout, remote base URL.

use std::time::Duration;

/// Retries after the first attempt (four attempts in total).
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Remote serving the mobile translation page.
pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Retry pipeline settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Upper bound per attempt in milliseconds; unbounded when absent.
    pub attempt_timeout_ms: Option<u64>,
    /// Remote base URL.
    pub base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            attempt_timeout_ms: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Per-attempt timeout, if any.
    #[must_use]
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }

    /// Total attempts including the first.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

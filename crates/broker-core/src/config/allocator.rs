//! Allocation protocol configuration.

use serde::{Deserialize, Serialize};

/// Allocation protocol configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Delay before trying the next candidate after a `Taken` outcome.
    #[serde(default = "default_contention_delay")]
    pub contention_delay_ms: u64,
    /// Overall deadline for one allocation in milliseconds (0 = none).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            contention_delay_ms: default_contention_delay(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

fn default_contention_delay() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    29_000
}

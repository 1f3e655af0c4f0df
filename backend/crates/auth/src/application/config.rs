//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued session tokens
    pub token_ttl: Duration,
    /// Deadline for a single store call
    pub store_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),   // 1 hour
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthConfig {
    pub fn new(token_ttl: Duration, store_timeout: Duration) -> Self {
        Self {
            token_ttl,
            store_timeout,
        }
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }
}

//! Session configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a single FIX session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Heartbeat interval requested at logon (seconds).
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
    /// Bounded wait for the Logon acknowledgment (ms).
    #[serde(default = "default_logon_timeout_ms")]
    pub logon_timeout_ms: u64,
    /// Bounded wait for the Logout acknowledgment (ms).
    #[serde(default = "default_logout_timeout_ms")]
    pub logout_timeout_ms: u64,
    /// Inbound buffer capacity in messages. The reader task awaits on a
    /// full buffer, so transport backpressure is the overflow policy.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

fn default_heartbeat_interval_secs() -> u64 {
    30
}

fn default_logon_timeout_ms() -> u64 {
    10_000
}

fn default_logout_timeout_ms() -> u64 {
    5_000
}

fn default_buffer_capacity() -> usize {
    1024
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            logon_timeout_ms: default_logon_timeout_ms(),
            logout_timeout_ms: default_logout_timeout_ms(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl SessionConfig {
    pub fn logon_timeout(&self) -> Duration {
        Duration::from_millis(self.logon_timeout_ms)
    }

    pub fn logout_timeout(&self) -> Duration {
        Duration::from_millis(self.logout_timeout_ms)
    }
}

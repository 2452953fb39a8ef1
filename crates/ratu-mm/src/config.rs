//! Market-making engine configuration.

use ratu_core::Size;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one double-quote market-making cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmConfig {
    /// Instrument symbol, e.g. "ETHFDUSD".
    pub symbol: String,
    /// Quantity for both quotes.
    pub quantity: Size,
    /// Overall deadline for the fill-tracking loop (seconds).
    #[serde(default = "default_fill_timeout_secs")]
    pub fill_timeout_secs: u64,
    /// Per-poll wait for execution reports inside the tracking loop (ms).
    #[serde(default = "default_report_poll_ms")]
    pub report_poll_ms: u64,
    /// Per-poll wait for market data snapshots (ms).
    #[serde(default = "default_book_poll_ms")]
    pub book_poll_ms: u64,
    /// Backoff between book polls while the book is one-sided (ms).
    #[serde(default = "default_poll_backoff_ms")]
    pub poll_backoff_ms: u64,
}

fn default_fill_timeout_secs() -> u64 {
    120
}

fn default_report_poll_ms() -> u64 {
    500
}

fn default_book_poll_ms() -> u64 {
    500
}

fn default_poll_backoff_ms() -> u64 {
    50
}

impl MmConfig {
    pub fn fill_timeout(&self) -> Duration {
        Duration::from_secs(self.fill_timeout_secs)
    }

    pub fn report_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.report_poll_ms)
    }

    pub fn book_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.book_poll_ms)
    }

    pub fn poll_backoff(&self) -> Duration {
        Duration::from_millis(self.poll_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let config: MmConfig = toml::from_str(
            r#"
            symbol = "ETHFDUSD"
            quantity = "0.01"
            "#,
        )
        .unwrap();
        assert_eq!(config.symbol, "ETHFDUSD");
        assert_eq!(config.fill_timeout(), Duration::from_secs(120));
        assert_eq!(config.report_poll_timeout(), Duration::from_millis(500));
        assert_eq!(config.poll_backoff(), Duration::from_millis(50));
    }
}

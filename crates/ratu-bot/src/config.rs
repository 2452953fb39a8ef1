//! Application configuration.

use crate::error::{AppError, AppResult};
use ratu_mm::MmConfig;
use ratu_session::SessionConfig;
use serde::{Deserialize, Serialize};

/// The venue's three FIX endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Order-entry endpoint, `tcp+tls://host:port`.
    pub order_entry: String,
    /// Market-data endpoint.
    pub market_data: String,
    /// Drop-copy endpoint. Only probed by the limit-check tool.
    #[serde(default)]
    pub drop_copy: Option<String>,
}

/// Credential material for logon signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// API key identifier sent as Username (553).
    pub api_key: String,
    /// Path to the Ed25519 private key (PKCS#8 PEM).
    pub private_key_path: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoints: EndpointsConfig,
    pub credentials: CredentialsConfig,
    /// Session-layer tuning, shared by all sessions.
    #[serde(default)]
    pub session: SessionConfig,
    /// Market-making cycle parameters.
    pub trading: MmConfig,
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [endpoints]
            order_entry = "tcp+tls://fix-oe.example.com:9000"
            market_data = "tcp+tls://fix-md.example.com:9000"
            drop_copy = "tcp+tls://fix-dc.example.com:9000"

            [credentials]
            api_key = "my-key-id"
            private_key_path = "keys/ed25519.pem"

            [session]
            logon_timeout_ms = 15000

            [trading]
            symbol = "ETHFDUSD"
            quantity = "0.01"
            fill_timeout_secs = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoints.order_entry, "tcp+tls://fix-oe.example.com:9000");
        assert_eq!(config.credentials.api_key, "my-key-id");
        assert_eq!(config.session.logon_timeout(), Duration::from_secs(15));
        // Unspecified session fields keep their defaults.
        assert_eq!(config.session.buffer_capacity, 1024);
        assert_eq!(config.trading.symbol, "ETHFDUSD");
        assert_eq!(config.trading.fill_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_drop_copy_is_optional() {
        let config: AppConfig = toml::from_str(
            r#"
            [endpoints]
            order_entry = "tcp+tls://fix-oe.example.com:9000"
            market_data = "tcp+tls://fix-md.example.com:9000"

            [credentials]
            api_key = "my-key-id"
            private_key_path = "keys/ed25519.pem"

            [trading]
            symbol = "ETHFDUSD"
            quantity = "0.01"
            "#,
        )
        .unwrap();
        assert!(config.endpoints.drop_copy.is_none());
    }
}

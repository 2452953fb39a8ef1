//! FIX endpoint roles.
//!
//! The venue exposes three fixed endpoint roles, each a separate
//! host:port behind TLS. The roles share no state; each gets its own
//! independent session.

use crate::error::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Endpoint role for a FIX session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    /// Order entry: NewOrderSingle, ExecutionReports, limit query.
    OrderEntry,
    /// Market data: subscriptions, snapshots/increments, limit query.
    MarketData,
    /// Drop copy: execution report mirror; limit query not supported.
    DropCopy,
}

impl EndpointRole {
    /// Whether the vendor limit query (XLQ) is accepted on this role.
    pub fn supports_limit_query(&self) -> bool {
        !matches!(self, Self::DropCopy)
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderEntry => write!(f, "order-entry"),
            Self::MarketData => write!(f, "market-data"),
            Self::DropCopy => write!(f, "drop-copy"),
        }
    }
}

/// Parse a `tcp+tls://host:port` endpoint URL into (host, port).
pub fn parse_endpoint(url: &str) -> SessionResult<(String, u16)> {
    let rest = url
        .strip_prefix("tcp+tls://")
        .ok_or_else(|| SessionError::InvalidEndpoint(format!("expected tcp+tls:// in {url}")))?;
    let (host, port) = rest
        .rsplit_once(':')
        .ok_or_else(|| SessionError::InvalidEndpoint(format!("missing port in {url}")))?;
    let port: u16 = port
        .parse()
        .map_err(|_| SessionError::InvalidEndpoint(format!("bad port in {url}")))?;
    if host.is_empty() {
        return Err(SessionError::InvalidEndpoint(format!(
            "missing host in {url}"
        )));
    }
    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint() {
        let (host, port) = parse_endpoint("tcp+tls://fix-oe.example.com:9000").unwrap();
        assert_eq!(host, "fix-oe.example.com");
        assert_eq!(port, 9000);
    }

    #[test]
    fn test_parse_endpoint_rejects_bad_urls() {
        assert!(parse_endpoint("tcp://fix-oe.example.com:9000").is_err());
        assert!(parse_endpoint("tcp+tls://fix-oe.example.com").is_err());
        assert!(parse_endpoint("tcp+tls://:9000").is_err());
        assert!(parse_endpoint("tcp+tls://host:abc").is_err());
    }

    #[test]
    fn test_limit_query_support() {
        assert!(EndpointRole::OrderEntry.supports_limit_query());
        assert!(EndpointRole::MarketData.supports_limit_query());
        assert!(!EndpointRole::DropCopy.supports_limit_query());
    }
}

//! Order-related types and identifiers.
//!
//! Provides order side, type, time-in-force, status, and client order ID
//! types with conversions to and from their FIX wire codes. Wire codes are
//! converted exactly once at the decode boundary; the rest of the system
//! works with these enums.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// FIX tag 54 wire code.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::Buy => "1",
            Self::Sell => "2",
        }
    }

    /// Decode a FIX tag 54 value.
    pub fn from_wire(code: &str) -> Result<Self, CoreError> {
        match code {
            "1" => Ok(Self::Buy),
            "2" => Ok(Self::Sell),
            other => Err(CoreError::UnknownSide(other.to_string())),
        }
    }

    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type (FIX tag 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrdType {
    Market,
    Limit,
}

impl OrdType {
    /// FIX tag 40 wire code.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::Market => "1",
            Self::Limit => "2",
        }
    }
}

impl fmt::Display for OrdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Time-in-force (FIX tag 59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancel (the MM cycle rests both quotes).
    #[default]
    #[serde(rename = "Gtc")]
    GoodTilCancel,
    /// Immediate-or-cancel.
    #[serde(rename = "Ioc")]
    ImmediateOrCancel,
    /// Fill-or-kill.
    #[serde(rename = "Fok")]
    FillOrKill,
}

impl TimeInForce {
    /// FIX tag 59 wire code.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::GoodTilCancel => "1",
            Self::ImmediateOrCancel => "3",
            Self::FillOrKill => "4",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTilCancel => write!(f, "GTC"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
            Self::FillOrKill => write!(f, "FOK"),
        }
    }
}

/// Order status from an execution report (FIX tag 39).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrdStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    PendingNew,
    Expired,
}

impl OrdStatus {
    /// Decode a FIX tag 39 value.
    pub fn from_wire(code: &str) -> Result<Self, CoreError> {
        match code {
            "0" => Ok(Self::New),
            "1" => Ok(Self::PartiallyFilled),
            "2" => Ok(Self::Filled),
            "4" => Ok(Self::Canceled),
            "6" => Ok(Self::PendingCancel),
            "8" => Ok(Self::Rejected),
            "A" => Ok(Self::PendingNew),
            "C" => Ok(Self::Expired),
            other => Err(CoreError::UnknownOrdStatus(other.to_string())),
        }
    }

    /// Returns true once the order can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired
        )
    }
}

impl fmt::Display for OrdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "NEW",
            Self::PartiallyFilled => "PARTIALLY_FILLED",
            Self::Filled => "FILLED",
            Self::Canceled => "CANCELED",
            Self::PendingCancel => "PENDING_CANCEL",
            Self::Rejected => "REJECTED",
            Self::PendingNew => "PENDING_NEW",
            Self::Expired => "EXPIRED",
        };
        write!(f, "{s}")
    }
}

/// Client order ID used to correlate orders with execution reports.
///
/// Unique per session lifetime: a one-letter side prefix followed by a
/// nanosecond timestamp, matching the venue's ClOrdID length limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientOrderId(String);

impl ClientOrderId {
    /// Create a new unique client order ID with the given prefix.
    pub fn with_prefix(prefix: &str) -> Self {
        let ns = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() * 1_000_000);
        Self(format!("{prefix}{ns}"))
    }

    /// Create from an existing string (for parsing execution reports).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClientOrderId {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl AsRef<str> for ClientOrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_wire_roundtrip() {
        assert_eq!(OrderSide::from_wire("1").unwrap(), OrderSide::Buy);
        assert_eq!(OrderSide::from_wire("2").unwrap(), OrderSide::Sell);
        assert_eq!(OrderSide::Buy.wire_code(), "1");
        assert!(OrderSide::from_wire("9").is_err());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_ord_status_decoding() {
        assert_eq!(OrdStatus::from_wire("0").unwrap(), OrdStatus::New);
        assert_eq!(OrdStatus::from_wire("2").unwrap(), OrdStatus::Filled);
        assert_eq!(OrdStatus::from_wire("A").unwrap(), OrdStatus::PendingNew);
        assert_eq!(OrdStatus::from_wire("C").unwrap(), OrdStatus::Expired);
        assert!(OrdStatus::from_wire("Z").is_err());
    }

    #[test]
    fn test_ord_status_terminal() {
        assert!(OrdStatus::Filled.is_terminal());
        assert!(OrdStatus::Canceled.is_terminal());
        assert!(OrdStatus::Rejected.is_terminal());
        assert!(OrdStatus::Expired.is_terminal());

        assert!(!OrdStatus::New.is_terminal());
        assert!(!OrdStatus::PartiallyFilled.is_terminal());
        assert!(!OrdStatus::PendingNew.is_terminal());
        assert!(!OrdStatus::PendingCancel.is_terminal());
    }

    #[test]
    fn test_client_order_id_unique() {
        let a = ClientOrderId::with_prefix("B");
        let b = ClientOrderId::with_prefix("B");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('B'));
    }
}

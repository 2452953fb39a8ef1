//! Decoded FIX message representation.
//!
//! A message is an ordered sequence of (tag, value) pairs plus a typed
//! message kind. Repeating groups are not reified into nested structures;
//! they are accessed by 1-based occurrence index, mirroring how the wire
//! format carries them.

use std::fmt;

/// Semantic message kind, dispatched from MsgType (tag 35).
///
/// Unrecognized types fall back to `Other` so the session can buffer and
/// log them without failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MsgKind {
    Heartbeat,
    TestRequest,
    Reject,
    Logout,
    Logon,
    News,
    ExecutionReport,
    NewOrderSingle,
    MarketDataRequest,
    MarketDataSnapshot,
    MarketDataIncremental,
    LimitQuery,
    LimitResponse,
    Other(String),
}

impl MsgKind {
    /// Decode a MsgType (tag 35) value.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "3" => Self::Reject,
            "5" => Self::Logout,
            "A" => Self::Logon,
            "B" => Self::News,
            "8" => Self::ExecutionReport,
            "D" => Self::NewOrderSingle,
            "V" => Self::MarketDataRequest,
            "W" => Self::MarketDataSnapshot,
            "X" => Self::MarketDataIncremental,
            "XLQ" => Self::LimitQuery,
            "XLR" => Self::LimitResponse,
            other => Self::Other(other.to_string()),
        }
    }

    /// The MsgType (tag 35) wire value.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::Reject => "3",
            Self::Logout => "5",
            Self::Logon => "A",
            Self::News => "B",
            Self::ExecutionReport => "8",
            Self::NewOrderSingle => "D",
            Self::MarketDataRequest => "V",
            Self::MarketDataSnapshot => "W",
            Self::MarketDataIncremental => "X",
            Self::LimitQuery => "XLQ",
            Self::LimitResponse => "XLR",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// A decoded FIX message: typed kind plus ordered tag/value pairs.
///
/// All decoded fields are retained in wire order, header and trailer
/// included, so repeating groups keep their relative positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixMessage {
    kind: MsgKind,
    fields: Vec<(u32, String)>,
}

impl FixMessage {
    pub fn new(kind: MsgKind, fields: Vec<(u32, String)>) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> &MsgKind {
        &self.kind
    }

    /// All fields in wire order.
    pub fn fields(&self) -> &[(u32, String)] {
        &self.fields
    }

    /// First occurrence of `tag`, or `None` if absent.
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.get_at(tag, 1)
    }

    /// The `occurrence`-th (1-based) instance of `tag`.
    ///
    /// Returns `None` for occurrence 0 or any index past the last
    /// instance present in the message; repeating-group reads past the
    /// declared count fail explicitly instead of yielding a default.
    pub fn get_at(&self, tag: u32, occurrence: usize) -> Option<&str> {
        if occurrence == 0 {
            return None;
        }
        self.fields
            .iter()
            .filter(|(t, _)| *t == tag)
            .nth(occurrence - 1)
            .map(|(_, v)| v.as_str())
    }

    /// Declared count of a repeating group, read from its count tag.
    ///
    /// Absent or non-numeric counts read as 0: a missing
    /// NoMDEntries/NoLimitIndicators means an empty group.
    pub fn group_count(&self, count_tag: u32) -> usize {
        self.get(count_tag)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag;

    fn snapshot() -> FixMessage {
        FixMessage::new(
            MsgKind::MarketDataSnapshot,
            vec![
                (tag::MD_REQ_ID, "BOOK_TICKER_STREAM".into()),
                (tag::SYMBOL, "ETHFDUSD".into()),
                (tag::NO_MD_ENTRIES, "2".into()),
                (tag::MD_ENTRY_TYPE, "0".into()),
                (tag::MD_ENTRY_PX, "2500.00".into()),
                (tag::MD_ENTRY_TYPE, "1".into()),
                (tag::MD_ENTRY_PX, "2500.10".into()),
            ],
        )
    }

    #[test]
    fn test_msg_kind_wire_roundtrip() {
        for code in ["0", "1", "3", "5", "A", "B", "8", "D", "V", "W", "X", "XLQ", "XLR"] {
            assert_eq!(MsgKind::from_wire(code).as_wire(), code);
        }
        assert_eq!(
            MsgKind::from_wire("XCN"),
            MsgKind::Other("XCN".to_string())
        );
    }

    #[test]
    fn test_get_first_occurrence() {
        let msg = snapshot();
        assert_eq!(msg.get(tag::SYMBOL), Some("ETHFDUSD"));
        assert_eq!(msg.get(tag::MD_ENTRY_TYPE), Some("0"));
        assert_eq!(msg.get(tag::CL_ORD_ID), None);
    }

    #[test]
    fn test_get_at_repeating_group() {
        let msg = snapshot();
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 1), Some("2500.00"));
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 2), Some("2500.10"));
    }

    #[test]
    fn test_get_at_out_of_range_is_none() {
        let msg = snapshot();
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 0), None);
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 3), None);
        assert_eq!(msg.get_at(tag::MD_ENTRY_PX, 100), None);
    }

    #[test]
    fn test_group_count() {
        let msg = snapshot();
        assert_eq!(msg.group_count(tag::NO_MD_ENTRIES), 2);
        assert_eq!(msg.group_count(tag::NO_LIMIT_INDICATORS), 0);
    }
}

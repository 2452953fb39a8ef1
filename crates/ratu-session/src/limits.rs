//! Vendor limit query (XLQ/XLR).
//!
//! Order-entry and market-data sessions answer XLQ with an XLR carrying
//! a repeating group of limit indicators: current consumption, maximum,
//! and the reset interval. Drop copy rejects the query, so callers gate
//! on [`EndpointRole::supports_limit_query`](crate::endpoint::EndpointRole::supports_limit_query).

use crate::error::{SessionError, SessionResult};
use crate::io::FixIo;
use ratu_fix::{tag, FixMessage, MsgKind};
use std::fmt;
use std::time::Duration;

/// Limit category reported in tag 25004.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitType {
    Order,
    Message,
    Subscription,
    Unknown(String),
}

impl LimitType {
    fn from_wire(code: &str) -> Self {
        match code {
            "1" => Self::Order,
            "2" => Self::Message,
            "3" => Self::Subscription,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "ORDER_LIMIT"),
            Self::Message => write!(f, "MESSAGE_LIMIT"),
            Self::Subscription => write!(f, "SUBSCRIPTION_LIMIT"),
            Self::Unknown(code) => write!(f, "UNKNOWN({code})"),
        }
    }
}

/// Reset-interval resolution reported in tag 25008.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalResolution {
    Second,
    Minute,
    Hour,
    Day,
    Unknown(String),
}

impl IntervalResolution {
    fn from_wire(code: &str) -> Self {
        match code {
            "s" => Self::Second,
            "m" => Self::Minute,
            "h" => Self::Hour,
            "d" => Self::Day,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for IntervalResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Second => write!(f, "SECOND"),
            Self::Minute => write!(f, "MINUTE"),
            Self::Hour => write!(f, "HOUR"),
            Self::Day => write!(f, "DAY"),
            Self::Unknown(code) => write!(f, "UNKNOWN({code})"),
        }
    }
}

/// One indicator from the XLR limit group.
///
/// All value fields are optional: the venue omits fields that do not
/// apply to a given limit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitEntry {
    pub limit_type: LimitType,
    pub count: Option<u64>,
    pub max: Option<u64>,
    pub interval: Option<u64>,
    pub resolution: Option<IntervalResolution>,
}

impl fmt::Display for LimitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type: {}", self.limit_type)?;
        if let Some(count) = self.count {
            write!(f, " | Count: {count}")?;
        }
        if let Some(max) = self.max {
            write!(f, " | Max: {max}")?;
        }
        if let Some(interval) = self.interval {
            write!(f, " | Interval: {interval}")?;
            if let Some(res) = &self.resolution {
                write!(f, " {res}")?;
            }
        }
        Ok(())
    }
}

/// Parse the limit indicator group out of an XLR message.
pub fn parse_limit_response(msg: &FixMessage) -> Vec<LimitEntry> {
    let count = msg.group_count(tag::NO_LIMIT_INDICATORS);
    let mut entries = Vec::with_capacity(count);
    for occurrence in 1..=count {
        let Some(limit_type) = msg.get_at(tag::LIMIT_TYPE, occurrence) else {
            // Declared count exceeds the fields present; stop at what we have.
            break;
        };
        entries.push(LimitEntry {
            limit_type: LimitType::from_wire(limit_type),
            count: parse_at(msg, tag::LIMIT_COUNT, occurrence),
            max: parse_at(msg, tag::LIMIT_MAX, occurrence),
            interval: parse_at(msg, tag::LIMIT_RESET_INTERVAL, occurrence),
            resolution: msg
                .get_at(tag::LIMIT_RESET_INTERVAL_RESOLUTION, occurrence)
                .map(IntervalResolution::from_wire),
        });
    }
    entries
}

fn parse_at(msg: &FixMessage, t: u32, occurrence: usize) -> Option<u64> {
    msg.get_at(t, occurrence).and_then(|v| v.parse().ok())
}

/// Send an XLQ and wait for the XLR, returning the parsed limit group.
///
/// No XLR within `timeout` is [`SessionError::LimitQueryTimeout`]; when
/// several arrive, the latest one wins.
pub async fn query_limits(session: &dyn FixIo, timeout: Duration) -> SessionResult<Vec<LimitEntry>> {
    session
        .send(
            MsgKind::LimitQuery,
            vec![(tag::LIMIT_REQUEST, "current_message_rate".to_string())],
        )
        .await?;

    let responses = session.retrieve_until(MsgKind::LimitResponse, timeout).await;
    match responses.last() {
        Some(msg) => Ok(parse_limit_response(msg)),
        None => Err(SessionError::LimitQueryTimeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedSession;

    fn limit_response() -> FixMessage {
        FixMessage::new(
            MsgKind::LimitResponse,
            vec![
                (tag::NO_LIMIT_INDICATORS, "2".into()),
                (tag::LIMIT_TYPE, "2".into()),
                (tag::LIMIT_COUNT, "2".into()),
                (tag::LIMIT_MAX, "10000".into()),
                (tag::LIMIT_RESET_INTERVAL, "10".into()),
                (tag::LIMIT_RESET_INTERVAL_RESOLUTION, "s".into()),
                (tag::LIMIT_TYPE, "1".into()),
                (tag::LIMIT_COUNT, "0".into()),
                (tag::LIMIT_MAX, "200".into()),
            ],
        )
    }

    #[test]
    fn test_parse_limit_response_groups() {
        let entries = parse_limit_response(&limit_response());
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].limit_type, LimitType::Message);
        assert_eq!(entries[0].count, Some(2));
        assert_eq!(entries[0].max, Some(10000));
        assert_eq!(entries[0].interval, Some(10));
        assert_eq!(entries[0].resolution, Some(IntervalResolution::Second));

        assert_eq!(entries[1].limit_type, LimitType::Order);
        assert_eq!(entries[1].max, Some(200));
        assert_eq!(entries[1].interval, None);
        assert_eq!(entries[1].resolution, None);
    }

    #[test]
    fn test_parse_limit_response_short_group() {
        // Declared count of 3 with only one entry present.
        let msg = FixMessage::new(
            MsgKind::LimitResponse,
            vec![
                (tag::NO_LIMIT_INDICATORS, "3".into()),
                (tag::LIMIT_TYPE, "3".into()),
                (tag::LIMIT_COUNT, "5".into()),
            ],
        );
        let entries = parse_limit_response(&msg);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].limit_type, LimitType::Subscription);
    }

    #[test]
    fn test_entry_display() {
        let entries = parse_limit_response(&limit_response());
        assert_eq!(
            entries[0].to_string(),
            "Type: MESSAGE_LIMIT | Count: 2 | Max: 10000 | Interval: 10 SECOND"
        );
    }

    #[tokio::test]
    async fn test_query_limits_sends_xlq_and_parses_xlr() {
        let session = ScriptedSession::new();
        session.push_inbound(limit_response());

        let entries = query_limits(&session, Duration::from_millis(50))
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);

        let sent = session.sent_of(&MsgKind::LimitQuery);
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            vec![(tag::LIMIT_REQUEST, "current_message_rate".to_string())]
        );
    }

    #[tokio::test]
    async fn test_query_limits_times_out_without_response() {
        let session = ScriptedSession::new();
        let result = query_limits(&session, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(SessionError::LimitQueryTimeout)));
    }
}

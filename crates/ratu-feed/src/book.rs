//! Best bid/ask extraction from market data messages.

use ratu_core::Price;
use ratu_fix::{tag, FixMessage, MsgKind};
use tracing::debug;

/// Top of book assembled from one or more market data messages.
///
/// Either side may be absent when the scanned batch carried no entry of
/// that type; callers poll again rather than trade on a one-sided book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookTop {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
    /// Book sequence identifier from the most recent message carrying one.
    pub last_book_id: Option<u64>,
}

impl BookTop {
    pub fn is_complete(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }

    /// Both sides, or `None` while the book is one-sided.
    pub fn best(&self) -> Option<(Price, Price)> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid, ask)),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookTop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn side(px: &Option<Price>) -> String {
            px.map_or_else(|| "-".to_string(), |p| p.to_string())
        }
        write!(f, "bid={} ask={}", side(&self.bid), side(&self.ask))?;
        if let Some(book_id) = self.last_book_id {
            write!(f, " book_id={book_id}")?;
        }
        Ok(())
    }
}

/// Scan a batch of snapshot/incremental messages and return the most
/// recently seen bid and offer.
///
/// Later messages in arrival order override earlier ones for the same
/// entry type. Messages of other kinds and entries with unparsable
/// prices are skipped.
pub fn extract_best_bid_ask(messages: &[FixMessage]) -> BookTop {
    let mut top = BookTop::default();
    for msg in messages {
        match msg.kind() {
            MsgKind::MarketDataSnapshot | MsgKind::MarketDataIncremental => {}
            other => {
                debug!(kind = %other, "skipping non-market-data message");
                continue;
            }
        }

        let entries = msg.group_count(tag::NO_MD_ENTRIES);
        for occurrence in 1..=entries {
            let entry_type = msg.get_at(tag::MD_ENTRY_TYPE, occurrence);
            let price = msg
                .get_at(tag::MD_ENTRY_PX, occurrence)
                .and_then(|v| v.parse::<Price>().ok());
            match (entry_type, price) {
                (Some("0"), Some(px)) => top.bid = Some(px),
                (Some("1"), Some(px)) => top.ask = Some(px),
                (Some(_), _) | (None, _) => {}
            }
        }

        if let Some(book_id) = msg.get(tag::LAST_BOOK_UPDATE_ID).and_then(|v| v.parse().ok()) {
            top.last_book_id = Some(book_id);
        }
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(bid: &str, ask: &str, book_id: &str) -> FixMessage {
        FixMessage::new(
            MsgKind::MarketDataSnapshot,
            vec![
                (tag::SYMBOL, "ETHFDUSD".into()),
                (tag::NO_MD_ENTRIES, "2".into()),
                (tag::MD_ENTRY_TYPE, "0".into()),
                (tag::MD_ENTRY_PX, bid.into()),
                (tag::MD_ENTRY_TYPE, "1".into()),
                (tag::MD_ENTRY_PX, ask.into()),
                (tag::LAST_BOOK_UPDATE_ID, book_id.into()),
            ],
        )
    }

    #[test]
    fn test_extracts_both_sides() {
        let top = extract_best_bid_ask(&[snapshot("2500.00", "2500.10", "42")]);
        assert_eq!(top.bid, Some(Price::new(dec!(2500.00))));
        assert_eq!(top.ask, Some(Price::new(dec!(2500.10))));
        assert_eq!(top.last_book_id, Some(42));
        assert!(top.is_complete());
    }

    #[test]
    fn test_later_batch_overrides_earlier() {
        let top = extract_best_bid_ask(&[
            snapshot("100", "101", "1"),
            snapshot("100", "102", "2"),
        ]);
        assert_eq!(top.best(), Some((Price::new(dec!(100)), Price::new(dec!(102)))));
        assert_eq!(top.last_book_id, Some(2));
    }

    #[test]
    fn test_one_sided_book_is_incomplete() {
        let msg = FixMessage::new(
            MsgKind::MarketDataSnapshot,
            vec![
                (tag::NO_MD_ENTRIES, "1".into()),
                (tag::MD_ENTRY_TYPE, "0".into()),
                (tag::MD_ENTRY_PX, "2500.00".into()),
            ],
        );
        let top = extract_best_bid_ask(&[msg]);
        assert!(!top.is_complete());
        assert_eq!(top.best(), None);
        assert_eq!(top.bid, Some(Price::new(dec!(2500.00))));
    }

    #[test]
    fn test_skips_other_kinds_and_bad_prices() {
        let noise = FixMessage::new(MsgKind::News, vec![]);
        let bad_px = FixMessage::new(
            MsgKind::MarketDataIncremental,
            vec![
                (tag::NO_MD_ENTRIES, "1".into()),
                (tag::MD_ENTRY_TYPE, "1".into()),
                (tag::MD_ENTRY_PX, "not-a-price".into()),
            ],
        );
        let top = extract_best_bid_ask(&[noise, bad_px, snapshot("99", "101", "7")]);
        assert_eq!(top.best(), Some((Price::new(dec!(99)), Price::new(dec!(101)))));
    }

    #[test]
    fn test_display_rendering() {
        let top = extract_best_bid_ask(&[snapshot("100", "101", "7")]);
        assert_eq!(top.to_string(), "bid=100 ask=101 book_id=7");
        assert_eq!(BookTop::default().to_string(), "bid=- ask=-");
    }

    #[test]
    fn test_empty_batch_yields_incomplete() {
        let top = extract_best_bid_ask(&[]);
        assert!(!top.is_complete());
        assert_eq!(top.last_book_id, None);
    }
}

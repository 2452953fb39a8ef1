//! Book-ticker subscription over a market-data session.

use crate::book::{extract_best_bid_ask, BookTop};
use ratu_fix::{tag, MsgKind};
use ratu_session::{FixIo, SessionResult};
use std::time::Duration;
use tracing::{debug, info};

/// Request ID used for the book-ticker stream.
pub const BOOK_TICKER_STREAM: &str = "BOOK_TICKER_STREAM";

/// Market data entry type carried in tag 269.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdEntryKind {
    Bid,
    Offer,
    Trade,
}

impl MdEntryKind {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Bid => "0",
            Self::Offer => "1",
            Self::Trade => "2",
        }
    }

    /// Decode a tag 269 value.
    pub fn from_wire(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Bid),
            "1" => Some(Self::Offer),
            "2" => Some(Self::Trade),
            _ => None,
        }
    }

    /// Human-readable label used in rendered market data.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bid => "BID",
            Self::Offer => "OFFER",
            Self::Trade => "TRADE",
        }
    }
}

/// Tracks one book-ticker subscription for one instrument.
///
/// The session does not track subscription lifecycle; this type does,
/// so an unwind can call [`BookTickerSubscriber::unsubscribe`]
/// unconditionally without re-sending for a stream that was never
/// opened.
#[derive(Debug)]
pub struct BookTickerSubscriber {
    request_id: String,
    symbol: String,
    active: bool,
}

impl BookTickerSubscriber {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            request_id: BOOK_TICKER_STREAM.to_string(),
            symbol: symbol.into(),
            active: false,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Send the subscription request. Does not block for an
    /// acknowledgment; data arrival is the confirmation.
    pub async fn subscribe(
        &mut self,
        session: &dyn FixIo,
        entry_types: &[MdEntryKind],
    ) -> SessionResult<()> {
        let mut body = vec![
            (tag::MD_REQ_ID, self.request_id.clone()),
            (tag::SUBSCRIPTION_REQUEST_TYPE, "1".to_string()),
            (tag::MARKET_DEPTH, "1".to_string()),
            (tag::AGGREGATED_BOOK, "Y".to_string()),
            (tag::NO_RELATED_SYM, "1".to_string()),
            (tag::SYMBOL, self.symbol.clone()),
            (tag::NO_MD_ENTRY_TYPES, entry_types.len().to_string()),
        ];
        for entry in entry_types {
            body.push((tag::MD_ENTRY_TYPE, entry.as_wire().to_string()));
        }
        session.send(MsgKind::MarketDataRequest, body).await?;
        self.active = true;
        info!(symbol = %self.symbol, request_id = %self.request_id, "subscribed to book ticker");
        Ok(())
    }

    /// Close the stream. No-op when no subscription is active.
    ///
    /// The stream is closed by request ID; the single trade entry type
    /// satisfies the required entry-type group.
    pub async fn unsubscribe(&mut self, session: &dyn FixIo) -> SessionResult<()> {
        if !self.active {
            debug!(symbol = %self.symbol, "unsubscribe skipped, no active subscription");
            return Ok(());
        }
        let body = vec![
            (tag::MD_REQ_ID, self.request_id.clone()),
            (tag::SUBSCRIPTION_REQUEST_TYPE, "2".to_string()),
            (tag::MARKET_DEPTH, "1".to_string()),
            (tag::AGGREGATED_BOOK, "Y".to_string()),
            (tag::NO_RELATED_SYM, "1".to_string()),
            (tag::SYMBOL, self.symbol.clone()),
            (tag::NO_MD_ENTRY_TYPES, "1".to_string()),
            (tag::MD_ENTRY_TYPE, MdEntryKind::Trade.as_wire().to_string()),
        ];
        session.send(MsgKind::MarketDataRequest, body).await?;
        self.active = false;
        info!(symbol = %self.symbol, request_id = %self.request_id, "unsubscribed from book ticker");
        Ok(())
    }

    /// Drain snapshots for up to `timeout` and extract the latest top of
    /// book. May return an incomplete [`BookTop`]; callers poll again.
    pub async fn poll_top(&self, session: &dyn FixIo, timeout: Duration) -> BookTop {
        let snapshots = session
            .retrieve_until(MsgKind::MarketDataSnapshot, timeout)
            .await;
        for msg in &snapshots {
            if let Some(rendered) = crate::render::render_market_data(msg) {
                debug!("{rendered}");
            }
        }
        extract_best_bid_ask(&snapshots)
    }
}

//! Human-readable rendering of market data messages.
//!
//! One line per message header plus one per book entry, written the way
//! the operational logs read: subscription ID, symbol, update count,
//! then per-entry type, price, and quantity.

use crate::subscriber::MdEntryKind;
use ratu_fix::{tag, FixMessage, MsgKind};
use std::fmt::Write;

/// Render a snapshot (W) or stream (X) message for logging.
///
/// Returns `None` for any other message kind. Absent fields render as
/// `?` rather than being skipped, so a malformed entry is visible in
/// the log instead of silently shortened.
pub fn render_market_data(msg: &FixMessage) -> Option<String> {
    let label = match msg.kind() {
        MsgKind::MarketDataSnapshot => "Snapshot",
        MsgKind::MarketDataIncremental => "Stream",
        _ => return None,
    };
    let subscription_id = msg.get(tag::MD_REQ_ID).unwrap_or("?");
    let symbol = msg.get(tag::SYMBOL).unwrap_or("?");
    let updates = msg.group_count(tag::NO_MD_ENTRIES);

    let mut out =
        format!("{label}: {subscription_id} -> {updates} updates received for Symbol: {symbol}");
    if let Some(book_id) = msg.get(tag::LAST_BOOK_UPDATE_ID) {
        let _ = write!(out, " and LastBookId: {book_id}");
    }

    for occurrence in 1..=updates {
        let update_type = msg.get_at(tag::MD_ENTRY_TYPE, occurrence).map_or("?", |c| {
            MdEntryKind::from_wire(c).map(MdEntryKind::label).unwrap_or(c)
        });
        let price = msg.get_at(tag::MD_ENTRY_PX, occurrence).unwrap_or("?");
        let qty = msg.get_at(tag::MD_ENTRY_SIZE, occurrence).unwrap_or("?");
        let _ = write!(out, "\nUpdate type: {update_type} | Price: {price} | Qty: {qty}");
    }
    Some(out)
}

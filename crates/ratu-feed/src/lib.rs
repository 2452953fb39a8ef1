//! Market data layer for the ratu trading client.
//!
//! Subscribes to the venue's book-ticker stream over a market-data FIX
//! session and assembles the best bid/ask from snapshot and incremental
//! messages. The subscriber owns subscription lifecycle; the session it
//! runs over is injected through the `FixIo` seam.

pub mod book;
pub mod render;
pub mod subscriber;

pub use book::{extract_best_bid_ask, BookTop};
pub use render::render_market_data;
pub use subscriber::{BookTickerSubscriber, MdEntryKind, BOOK_TICKER_STREAM};

//! Market-making engine for the ratu trading client.
//!
//! Coordinates an order-entry and a market-data session through one
//! double-quote cycle: price discovery, paired GTC limit orders, fill
//! tracking against an in-memory order table, and a guaranteed unwind.

pub mod config;
pub mod engine;
pub mod error;
pub mod order_table;

pub use config::MmConfig;
pub use engine::{CycleReport, MmEngine};
pub use error::{MmError, MmResult};
pub use order_table::{ApplyOutcome, OrderTable, QuotedOrder};

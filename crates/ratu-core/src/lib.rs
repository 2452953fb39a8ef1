//! Core domain types for the ratu FIX market-making client.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Price`, `Size`: Precision-safe numeric types
//! - `OrderSide`, `OrdStatus`, `OrdType`, `TimeInForce`: Trading enums
//!   with FIX wire-code conversions
//! - `ClientOrderId`: Locally generated order correlation identifier

pub mod decimal;
pub mod error;
pub mod order;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use order::{ClientOrderId, OrdStatus, OrdType, OrderSide, TimeInForce};

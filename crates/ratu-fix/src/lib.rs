//! FIX tag-value message codec.
//!
//! This crate provides the wire layer for the ratu trading client:
//! - `tag`: Well-known FIX tag number constants, including the venue's
//!   vendor extensions (limit query, book id)
//! - `FixMessage`: Decoded message with ordered tag/value pairs and
//!   1-based repeating-group access
//! - `MsgKind`: Tagged variant over the message types this client
//!   handles, with an `Other` fallback for everything else
//! - `codec`: Frame encoder/decoder with generated header, trailer and
//!   mod-256 checksum, plus an incremental frame splitter for the
//!   session reader
//!
//! Values stay opaque strings here; numeric interpretation (prices,
//! quantities, group counts) happens at the callers' decode boundaries.

pub mod codec;
pub mod error;
pub mod message;
pub mod tag;

pub use codec::{decode, encode, extract_frame, sending_time_now, MessageHeader};
pub use error::{FixError, FixResult};
pub use message::{FixMessage, MsgKind};

/// FIX field separator (SOH).
pub const SOH: u8 = 0x01;

/// Protocol version sent in BeginString (tag 8).
pub const BEGIN_STRING: &str = "FIX.4.4";

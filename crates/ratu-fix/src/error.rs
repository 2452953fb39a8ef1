//! FIX codec error types.

use thiserror::Error;

/// Errors raised while decoding or framing FIX messages.
///
/// A decode failure is local to the offending frame: the session layer
/// logs it and keeps reading, it never terminates the connection.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("Checksum mismatch: declared {declared}, computed {computed}")]
    ChecksumMismatch { declared: String, computed: String },

    #[error("Truncated frame: {0}")]
    Truncated(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Frame has no MsgType (35)")]
    MissingMsgType,
}

pub type FixResult<T> = Result<T, FixError>;

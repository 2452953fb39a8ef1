//! Session error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Logon not acknowledged within the timeout")]
    LogonTimeout,

    #[error("Logon rejected: {0}")]
    LogonRejected(String),

    #[error("Session is not connected")]
    NotConnected,

    #[error("Limit query not answered within the timeout")]
    LimitQueryTimeout,

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("FIX codec error: {0}")]
    Fix(#[from] ratu_fix::FixError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

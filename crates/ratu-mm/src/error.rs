//! Market-making errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MmError {
    #[error("Session error: {0}")]
    Session(#[from] ratu_session::SessionError),
}

pub type MmResult<T> = Result<T, MmError>;

//! FIX session layer for the ratu trading client.
//!
//! Provides one logical session per TLS transport connection:
//! - Logon/logout handshake with Ed25519 logon signing
//! - A reader task feeding a bounded inbound buffer
//! - Message-type-filtered retrieval with timeout semantics
//! - The `FixIo` trait seam the subscriber and engine program against,
//!   plus an in-memory `ScriptedSession` for tests
//! - The vendor limit query (XLQ/XLR) available on OE and MD sessions

pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod io;
pub mod limits;
pub mod session;

pub use config::SessionConfig;
pub use credentials::ApiCredentials;
pub use endpoint::EndpointRole;
pub use error::{SessionError, SessionResult};
pub use io::{BoxFuture, DynFixIo, FixIo, ScriptedSession};
pub use limits::{query_limits, IntervalResolution, LimitEntry, LimitType};
pub use session::{FixSession, SessionState};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any session connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

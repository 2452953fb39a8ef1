//! Session I/O trait seam.
//!
//! The subscriber and the market-making engine program against `FixIo`
//! rather than the concrete TLS-backed session. This allows:
//! - Dependency injection for testing
//! - Separation of message semantics from transport
//!
//! `ScriptedSession` is the in-memory implementation used by tests: it
//! records outbound messages and serves inbound ones from a queue.

use crate::error::{SessionError, SessionResult};
use parking_lot::Mutex;
use ratu_fix::{FixMessage, MsgKind};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// One logical FIX session as seen by its consumers.
pub trait FixIo: Send + Sync {
    /// Perform the logon handshake; absence of an acknowledgment within
    /// the session's bounded wait is a terminal failure for the attempt.
    fn logon(&self) -> BoxFuture<'_, SessionResult<()>>;

    /// Encode and transmit a message with the next sequence number.
    fn send(&self, kind: MsgKind, body: Vec<(u32, String)>) -> BoxFuture<'_, SessionResult<()>>;

    /// Drain the inbound buffer, blocking up to `timeout`, until at least
    /// one message of `kind` has been observed. Returns all observed
    /// messages of that kind in arrival order; empty on timeout (a normal
    /// outcome, not an error).
    fn retrieve_until(&self, kind: MsgKind, timeout: Duration) -> BoxFuture<'_, Vec<FixMessage>>;

    /// Return and clear all currently buffered inbound messages.
    fn drain_all(&self) -> BoxFuture<'_, Vec<FixMessage>>;

    /// Send Logout and wait for the acknowledgment.
    fn logout(&self) -> BoxFuture<'_, SessionResult<()>>;

    /// Close the transport. Idempotent.
    fn disconnect(&self) -> BoxFuture<'_, ()>;
}

/// Arc wrapper for FixIo trait objects.
pub type DynFixIo = Arc<dyn FixIo>;

/// In-memory session for tests: outbound messages are recorded, inbound
/// messages are served from a pre-loaded queue without waiting.
#[derive(Default)]
pub struct ScriptedSession {
    sent: Mutex<Vec<(MsgKind, Vec<(u32, String)>)>>,
    inbound: Mutex<VecDeque<FixMessage>>,
    fail_logon: AtomicBool,
    logon_count: AtomicUsize,
    logout_count: AtomicUsize,
    disconnect_count: AtomicUsize,
    drain_count: AtomicUsize,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an inbound message for later retrieval.
    pub fn push_inbound(&self, msg: FixMessage) {
        self.inbound.lock().push_back(msg);
    }

    /// Make the next logon attempt fail with `LogonTimeout`.
    pub fn fail_logon(&self) {
        self.fail_logon.store(true, Ordering::SeqCst);
    }

    /// All recorded outbound messages.
    pub fn sent(&self) -> Vec<(MsgKind, Vec<(u32, String)>)> {
        self.sent.lock().clone()
    }

    /// Recorded outbound messages of one kind.
    pub fn sent_of(&self, kind: &MsgKind) -> Vec<Vec<(u32, String)>> {
        self.sent
            .lock()
            .iter()
            .filter(|(k, _)| k == kind)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn logon_count(&self) -> usize {
        self.logon_count.load(Ordering::SeqCst)
    }

    pub fn logout_count(&self) -> usize {
        self.logout_count.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnect_count.load(Ordering::SeqCst)
    }

    pub fn drain_count(&self) -> usize {
        self.drain_count.load(Ordering::SeqCst)
    }
}

impl FixIo for ScriptedSession {
    fn logon(&self) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(async move {
            self.logon_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_logon.load(Ordering::SeqCst) {
                Err(SessionError::LogonTimeout)
            } else {
                Ok(())
            }
        })
    }

    fn send(&self, kind: MsgKind, body: Vec<(u32, String)>) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(async move {
            self.sent.lock().push((kind, body));
            Ok(())
        })
    }

    fn retrieve_until(&self, kind: MsgKind, _timeout: Duration) -> BoxFuture<'_, Vec<FixMessage>> {
        Box::pin(async move {
            // Scripted sessions never block: everything queued is drained
            // now; matching messages are returned and the rest discarded,
            // the same visible semantics as the real buffer.
            let mut queue = self.inbound.lock();
            let mut matches = Vec::new();
            while let Some(msg) = queue.pop_front() {
                if *msg.kind() == kind {
                    matches.push(msg);
                }
            }
            matches
        })
    }

    fn drain_all(&self) -> BoxFuture<'_, Vec<FixMessage>> {
        Box::pin(async move {
            self.drain_count.fetch_add(1, Ordering::SeqCst);
            self.inbound.lock().drain(..).collect()
        })
    }

    fn logout(&self) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(async move {
            self.logout_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn disconnect(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.disconnect_count.fetch_add(1, Ordering::SeqCst);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratu_fix::tag;

    fn report(cl_ord_id: &str) -> FixMessage {
        FixMessage::new(
            MsgKind::ExecutionReport,
            vec![(tag::CL_ORD_ID, cl_ord_id.to_string())],
        )
    }

    #[tokio::test]
    async fn test_scripted_retrieve_filters_by_kind() {
        let session = ScriptedSession::new();
        session.push_inbound(report("B1"));
        session.push_inbound(FixMessage::new(MsgKind::Heartbeat, vec![]));
        session.push_inbound(report("S1"));

        let reports = session
            .retrieve_until(MsgKind::ExecutionReport, Duration::from_millis(10))
            .await;
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].get(tag::CL_ORD_ID), Some("B1"));
        assert_eq!(reports[1].get(tag::CL_ORD_ID), Some("S1"));

        // The queue was drained, heartbeat included.
        assert!(session.drain_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_logon_failure() {
        let session = ScriptedSession::new();
        session.fail_logon();
        assert!(matches!(
            session.logon().await,
            Err(SessionError::LogonTimeout)
        ));
        assert_eq!(session.logon_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_records_sends() {
        let session = ScriptedSession::new();
        session
            .send(
                MsgKind::NewOrderSingle,
                vec![(tag::SYMBOL, "ETHFDUSD".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(session.sent_of(&MsgKind::NewOrderSingle).len(), 1);
        assert!(session.sent_of(&MsgKind::Logout).is_empty());
    }
}

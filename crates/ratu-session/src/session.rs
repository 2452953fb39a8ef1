//! FIX session: one transport connection, one inbound buffer.
//!
//! Owns the logon/logout handshake and the reader task that frames,
//! decodes, and buffers inbound messages. Consumers retrieve messages
//! by kind with a bounded wait; an empty result on timeout is a normal
//! outcome that enables polling loops.
//!
//! Heartbeating is handled transparently: inbound TestRequests are
//! answered by the reader task and admin heartbeats are never surfaced
//! to consumers. Sequence-gap recovery is the venue transport contract,
//! not reimplemented here.

use crate::config::SessionConfig;
use crate::credentials::{ApiCredentials, LogonPayload};
use crate::endpoint::{parse_endpoint, EndpointRole};
use crate::error::{SessionError, SessionResult};
use crate::io::{BoxFuture, FixIo};
use parking_lot::RwLock;
use ratu_fix::codec::{decode, encode, extract_frame, sending_time_now, MessageHeader};
use ratu_fix::{tag, FixMessage, MsgKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex as TokioMutex};
use tokio_rustls::TlsConnector;
use tracing::{debug, info, warn};

/// Session connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    LoggingOn,
    LoggedOn,
    LoggingOut,
}

type BoxedRead = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWrite = Box<dyn AsyncWrite + Send + Unpin>;

/// Outbound side shared between the session API and the reader task
/// (which answers TestRequests directly).
struct Outbound {
    role: EndpointRole,
    sender_comp_id: String,
    target_comp_id: String,
    next_seq: AtomicU64,
    writer: TokioMutex<Option<BoxedWrite>>,
}

impl Outbound {
    fn take_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    async fn write_frame(&self, frame: &[u8]) -> SessionResult<()> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(SessionError::NotConnected)?;
        writer.write_all(frame).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn write_message(&self, kind: &MsgKind, body: &[(u32, String)]) -> SessionResult<()> {
        let header = MessageHeader {
            sender_comp_id: self.sender_comp_id.clone(),
            target_comp_id: self.target_comp_id.clone(),
            msg_seq_num: self.take_seq(),
            sending_time: sending_time_now(),
        };
        let frame = encode(kind, &header, body);
        self.write_frame(&frame).await
    }
}

/// A FIX session bound to one transport connection.
pub struct FixSession {
    role: EndpointRole,
    config: SessionConfig,
    credentials: ApiCredentials,
    state: Arc<RwLock<SessionState>>,
    outbound: Arc<Outbound>,
    inbound: TokioMutex<mpsc::Receiver<FixMessage>>,
    reader: parking_lot::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl FixSession {
    /// Connect to a `tcp+tls://host:port` endpoint and start the reader.
    ///
    /// The session is `Disconnected` until [`FixSession::logon`] runs the
    /// handshake.
    pub async fn connect(
        role: EndpointRole,
        url: &str,
        config: SessionConfig,
        credentials: ApiCredentials,
    ) -> SessionResult<Self> {
        let (host, port) = parse_endpoint(url)?;
        let tcp = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|e| SessionError::ConnectionFailed(format!("{host}:{port}: {e}")))?;
        tcp.set_nodelay(true)?;

        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        let server_name = rustls::pki_types::ServerName::try_from(host.clone())
            .map_err(|_| SessionError::InvalidEndpoint(format!("bad TLS server name: {host}")))?;
        let stream = TlsConnector::from(Arc::new(tls_config))
            .connect(server_name, tcp)
            .await?;

        info!(role = %role, %host, port, "FIX transport connected");
        let (read_half, write_half) = tokio::io::split(stream);
        Ok(Self::from_parts(
            role,
            config,
            credentials,
            Box::new(read_half),
            Box::new(write_half),
        ))
    }

    /// Wire a session over an already-established transport.
    ///
    /// `connect` uses this with the TLS stream halves; tests use it with
    /// an in-memory duplex.
    pub fn from_parts(
        role: EndpointRole,
        config: SessionConfig,
        credentials: ApiCredentials,
        read: BoxedRead,
        write: BoxedWrite,
    ) -> Self {
        let sender_comp_id = generate_sender_comp_id();
        let outbound = Arc::new(Outbound {
            role,
            sender_comp_id,
            target_comp_id: "SPOT".to_string(),
            next_seq: AtomicU64::new(1),
            writer: TokioMutex::new(Some(write)),
        });

        let (tx, rx) = mpsc::channel(config.buffer_capacity);
        let reader_outbound = Arc::clone(&outbound);
        let reader = tokio::spawn(reader_loop(read, tx, reader_outbound));

        Self {
            role,
            config,
            credentials,
            state: Arc::new(RwLock::new(SessionState::Disconnected)),
            outbound,
            inbound: TokioMutex::new(rx),
            reader: parking_lot::Mutex::new(Some(reader)),
        }
    }

    pub fn role(&self) -> EndpointRole {
        self.role
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Run the logon handshake.
    ///
    /// Builds the signed Logon, transmits it, and waits for the
    /// acknowledgment; no ack within the configured bound is
    /// [`SessionError::LogonTimeout`], a terminal failure for this
    /// attempt that is never silently retried.
    pub async fn logon(&self) -> SessionResult<()> {
        *self.state.write() = SessionState::LoggingOn;

        let msg_seq_num = self.outbound.take_seq();
        let sending_time = sending_time_now();
        let payload = LogonPayload {
            msg_type: MsgKind::Logon.as_wire(),
            sender_comp_id: &self.outbound.sender_comp_id,
            target_comp_id: &self.outbound.target_comp_id,
            msg_seq_num,
            sending_time: &sending_time,
        };
        let raw_data = self.credentials.sign_logon(&payload);

        let body = vec![
            (tag::RAW_DATA_LENGTH, raw_data.len().to_string()),
            (tag::RAW_DATA, raw_data),
            (tag::ENCRYPT_METHOD, "0".to_string()),
            (
                tag::HEART_BT_INT,
                self.config.heartbeat_interval_secs.to_string(),
            ),
            (tag::RESET_SEQ_NUM_FLAG, "Y".to_string()),
            (tag::USERNAME, self.credentials.api_key().to_string()),
            (tag::MESSAGE_HANDLING, "1".to_string()),
        ];
        let header = MessageHeader {
            sender_comp_id: self.outbound.sender_comp_id.clone(),
            target_comp_id: self.outbound.target_comp_id.clone(),
            msg_seq_num,
            sending_time,
        };
        let frame = encode(&MsgKind::Logon, &header, &body);
        self.outbound.write_frame(&frame).await?;

        if let Err(e) = self.await_logon_response(self.config.logon_timeout()).await {
            *self.state.write() = SessionState::Disconnected;
            warn!(role = %self.role, error = %e, "logon failed");
            return Err(e);
        }

        *self.state.write() = SessionState::LoggedOn;
        info!(role = %self.role, "logon acknowledged");
        Ok(())
    }

    /// Wait for the venue's answer to an outbound Logon.
    ///
    /// A Logon ack succeeds; a Logout or Reject here is a rejection
    /// carrying its Text (58) reason, not a timeout.
    async fn await_logon_response(&self, timeout: Duration) -> SessionResult<()> {
        let deadline = Instant::now() + timeout;
        let mut rx = self.inbound.lock().await;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(SessionError::LogonTimeout);
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(msg)) => match msg.kind() {
                    MsgKind::Logon => return Ok(()),
                    MsgKind::Logout | MsgKind::Reject => {
                        let reason = msg
                            .get(tag::TEXT)
                            .unwrap_or("no reason given")
                            .to_string();
                        return Err(SessionError::LogonRejected(reason));
                    }
                    other => {
                        debug!(kind = %other, "discarding message while awaiting logon ack");
                    }
                },
                Ok(None) | Err(_) => return Err(SessionError::LogonTimeout),
            }
        }
    }

    /// Encode and transmit a message with the next sequence number.
    pub async fn send(&self, kind: MsgKind, body: Vec<(u32, String)>) -> SessionResult<()> {
        self.outbound.write_message(&kind, &body).await
    }

    /// Drain the inbound buffer, blocking up to `timeout`, until at least
    /// one message of `kind` is observed.
    ///
    /// Returns all observed messages of that kind in transport arrival
    /// order; empty on timeout. Non-matching messages drained along the
    /// way are discarded (logged at debug); the consumers of this
    /// session each poll for exactly one kind.
    pub async fn retrieve_until(&self, kind: MsgKind, timeout: Duration) -> Vec<FixMessage> {
        let deadline = Instant::now() + timeout;
        let mut matches = Vec::new();
        let mut rx = self.inbound.lock().await;

        loop {
            while let Ok(msg) = rx.try_recv() {
                Self::classify(&mut matches, msg, &kind);
            }
            if !matches.is_empty() {
                return matches;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return matches;
            }
            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(msg)) => Self::classify(&mut matches, msg, &kind),
                // Reader gone or timeout: both are the normal empty outcome.
                Ok(None) | Err(_) => return matches,
            }
        }
    }

    fn classify(matches: &mut Vec<FixMessage>, msg: FixMessage, wanted: &MsgKind) {
        if msg.kind() == wanted {
            matches.push(msg);
        } else {
            debug!(kind = %msg.kind(), wanted = %wanted, "discarding non-matching message");
        }
    }

    /// Return and clear all currently buffered messages regardless of
    /// kind. Used once right after logon to flush leftovers from a prior
    /// connection.
    pub async fn drain_all(&self) -> Vec<FixMessage> {
        let mut rx = self.inbound.lock().await;
        let mut all = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            all.push(msg);
        }
        all
    }

    /// Send Logout and wait for the acknowledgment.
    ///
    /// A missing ack is logged but not an error: the transport is closed
    /// either way by the following `disconnect`.
    pub async fn logout(&self) -> SessionResult<()> {
        *self.state.write() = SessionState::LoggingOut;
        self.outbound.write_message(&MsgKind::Logout, &[]).await?;

        let acks = self
            .retrieve_until(MsgKind::Logout, self.config.logout_timeout())
            .await;
        if acks.is_empty() {
            warn!(role = %self.role, "logout not acknowledged within timeout");
        }
        *self.state.write() = SessionState::Disconnected;
        info!(role = %self.role, "session logged out");
        Ok(())
    }

    /// Close the transport and stop the reader. Idempotent.
    pub async fn disconnect(&self) {
        let writer = self.outbound.writer.lock().await.take();
        let reader = self.reader.lock().take();
        if writer.is_none() && reader.is_none() {
            return;
        }

        if let Some(mut w) = writer {
            let _ = w.shutdown().await;
        }
        if let Some(handle) = reader {
            handle.abort();
        }
        *self.state.write() = SessionState::Disconnected;
        info!(role = %self.role, "session disconnected");
    }
}

impl FixIo for FixSession {
    fn logon(&self) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(FixSession::logon(self))
    }

    fn send(&self, kind: MsgKind, body: Vec<(u32, String)>) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(FixSession::send(self, kind, body))
    }

    fn retrieve_until(&self, kind: MsgKind, timeout: Duration) -> BoxFuture<'_, Vec<FixMessage>> {
        Box::pin(FixSession::retrieve_until(self, kind, timeout))
    }

    fn drain_all(&self) -> BoxFuture<'_, Vec<FixMessage>> {
        Box::pin(FixSession::drain_all(self))
    }

    fn logout(&self) -> BoxFuture<'_, SessionResult<()>> {
        Box::pin(FixSession::logout(self))
    }

    fn disconnect(&self) -> BoxFuture<'_, ()> {
        Box::pin(FixSession::disconnect(self))
    }
}

// SenderCompID must be unique per connection; a nanosecond timestamp is
// sufficient for a single process.
fn generate_sender_comp_id() -> String {
    format!("RATU{}", unix_nanos())
}

fn unix_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

/// Reader task: frame, decode, buffer.
///
/// Malformed frames are skipped with a warning and never terminate
/// the connection. Admin heartbeats are swallowed; TestRequests are
/// answered inline.
async fn reader_loop(
    mut read: BoxedRead,
    tx: mpsc::Sender<FixMessage>,
    outbound: Arc<Outbound>,
) {
    let mut buf: Vec<u8> = Vec::with_capacity(8 * 1024);
    let mut chunk = [0u8; 4096];

    loop {
        match read.read(&mut chunk).await {
            Ok(0) => {
                debug!(role = %outbound.role, "transport closed by peer");
                return;
            }
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                loop {
                    match extract_frame(&buf) {
                        Ok(Some((frame, consumed))) => {
                            buf.drain(..consumed);
                            match decode(&frame) {
                                Ok(msg) => {
                                    if handle_admin(&msg, &outbound).await {
                                        continue;
                                    }
                                    if tx.send(msg).await.is_err() {
                                        debug!(role = %outbound.role, "inbound receiver dropped");
                                        return;
                                    }
                                }
                                Err(e) => {
                                    warn!(role = %outbound.role, error = %e, "skipping malformed FIX frame");
                                }
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            // Unframeable bytes: resynchronize on the next read.
                            warn!(role = %outbound.role, error = %e, "dropping unframeable bytes");
                            buf.clear();
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                warn!(role = %outbound.role, error = %e, "transport read error");
                return;
            }
        }
    }
}

/// Handle admin messages inside the reader. Returns true when the
/// message was consumed and must not be buffered.
async fn handle_admin(msg: &FixMessage, outbound: &Outbound) -> bool {
    match msg.kind() {
        MsgKind::Heartbeat => {
            debug!(role = %outbound.role, "heartbeat received");
            true
        }
        MsgKind::TestRequest => {
            let body = msg
                .get(tag::TEST_REQ_ID)
                .map(|id| vec![(tag::TEST_REQ_ID, id.to_string())])
                .unwrap_or_default();
            if let Err(e) = outbound.write_message(&MsgKind::Heartbeat, &body).await {
                warn!(role = %outbound.role, error = %e, "failed to answer TestRequest");
            }
            true
        }
        _ => false,
    }
}

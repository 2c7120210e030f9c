//! Transport connector: exclusive owner of the connection lifecycle.
//!
//! State machine: `Disconnected → Connecting → Connected →
//! Disconnected`, with `Connecting → Error → Disconnected` on a failed
//! attempt. One attempt may be in flight at a time; connect and
//! disconnect serialize on a single async lock over the link slot, and
//! disconnect cancels an in-flight attempt through the token registered
//! in the session, so it never waits out the dial timeout.
//!
//! An established link runs two background tasks over the split stream:
//! a writer draining the outbound event queue and ticking keepalive
//! pings, and a reader decoding peer frames and reporting loss on
//! EOF or error. Both exit on the link's cancellation token.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use deskbridge_ipc::{BridgeError, Endpoint};
use deskbridge_protocol::{Frame, FrameDecoder, InputEvent};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::session::Session;

/// Transport streams the connector can drive. Tests substitute
/// in-memory duplexes for TCP sockets.
pub(crate) trait AsyncStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> AsyncStream for T {}

pub(crate) type BoxedStream = Box<dyn AsyncStream>;

/// Seam between the connector and the network.
#[async_trait]
pub(crate) trait Dialer: Send + Sync {
    async fn dial(&self, endpoint: &Endpoint) -> io::Result<BoxedStream>;
}

/// Production dialer: plain TCP with Nagle disabled, since input
/// events are small and latency-sensitive.
pub(crate) struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, endpoint: &Endpoint) -> io::Result<BoxedStream> {
        let stream = TcpStream::connect((endpoint.host(), endpoint.port())).await?;
        stream.set_nodelay(true)?;
        Ok(Box::new(stream))
    }
}

/// Handles for an established connection.
struct Link {
    cancel: CancellationToken,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Link {
    /// Stop both I/O tasks and wait for them to release the stream.
    async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.writer.await;
        let _ = self.reader.await;
    }
}

pub(crate) struct Connector {
    config: ClientConfig,
    session: Arc<Mutex<Session>>,
    dialer: Arc<dyn Dialer>,
    /// Connect/disconnect mutual exclusion on the connection resource.
    link: tokio::sync::Mutex<Option<Link>>,
    /// Outbound queue of the active link, if any.
    event_tx: Mutex<Option<mpsc::Sender<InputEvent>>>,
}

impl Connector {
    pub(crate) fn new(
        config: ClientConfig,
        session: Arc<Mutex<Session>>,
        dialer: Arc<dyn Dialer>,
    ) -> Self {
        Self {
            config,
            session,
            dialer,
            link: tokio::sync::Mutex::new(None),
            event_tx: Mutex::new(None),
        }
    }

    /// Run one connection attempt to `endpoint`.
    ///
    /// Blocks until the attempt resolves: established, failed, timed
    /// out, or cancelled by a concurrent disconnect.
    pub(crate) async fn connect(&self, endpoint: Endpoint) -> Result<(), BridgeError> {
        let cancel = CancellationToken::new();
        {
            let mut session = self.session.lock().expect("session mutex poisoned");
            match session.status() {
                s if s.is_connected() => {
                    let current =
                        session.endpoint_display().unwrap_or_else(|| endpoint.to_string());
                    return Err(BridgeError::AlreadyConnected { endpoint: current });
                }
                s if s.is_connecting() => return Err(BridgeError::ConnectInProgress),
                _ => {}
            }
            session.begin_attempt(endpoint.clone(), cancel.clone());
        }

        match self.dial_and_spawn(&endpoint, &cancel).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.session
                    .lock()
                    .expect("session mutex poisoned")
                    .fail_attempt(err.to_string());
                Err(err)
            }
        }
    }

    async fn dial_and_spawn(
        &self,
        endpoint: &Endpoint,
        cancel: &CancellationToken,
    ) -> Result<(), BridgeError> {
        let mut link_slot = self.link.lock().await;

        // A disconnect issued between the Connecting claim and here has
        // already fired the token.
        if cancel.is_cancelled() {
            return Err(BridgeError::ConnectCancelled);
        }

        let dial = tokio::time::timeout(self.config.connect_timeout(), self.dialer.dial(endpoint));
        let stream = tokio::select! {
            _ = cancel.cancelled() => return Err(BridgeError::ConnectCancelled),
            outcome = dial => match outcome {
                Err(_) => {
                    return Err(BridgeError::ConnectTimeout { endpoint: endpoint.to_string() })
                }
                Ok(Err(err)) => return Err(map_dial_error(endpoint, err)),
                Ok(Ok(stream)) => stream,
            },
        };

        // A link left behind by an asynchronous loss is torn down before
        // its replacement goes live.
        if let Some(stale) = link_slot.take() {
            stale.shutdown().await;
        }

        let (link, event_tx) = self.spawn_link(stream);
        *self.event_tx.lock().expect("event sender mutex poisoned") = Some(event_tx);
        *link_slot = Some(link);

        self.session.lock().expect("session mutex poisoned").establish();
        log::debug!("link established to {endpoint}");
        Ok(())
    }

    /// Tear down from any state. Cancels an in-flight attempt, releases
    /// the connection resource, and rests the session at `Disconnected`.
    pub(crate) async fn disconnect(&self) {
        {
            self.session.lock().expect("session mutex poisoned").cancel_attempt();
        }
        let mut link_slot = self.link.lock().await;
        self.event_tx.lock().expect("event sender mutex poisoned").take();
        if let Some(link) = link_slot.take() {
            link.shutdown().await;
        }
        self.session.lock().expect("session mutex poisoned").reset();
    }

    /// Queue a captured event for the writer task.
    pub(crate) fn queue_event(&self, event: InputEvent) -> Result<(), BridgeError> {
        let sender = {
            let guard = self.event_tx.lock().expect("event sender mutex poisoned");
            match guard.as_ref() {
                Some(sender) => sender.clone(),
                None => return Err(BridgeError::NotConnected),
            }
        };
        match sender.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                log::warn!("dropping input event: write queue full");
                Err(BridgeError::Transport { message: "write queue full".into() })
            }
            Err(TrySendError::Closed(_)) => Err(BridgeError::NotConnected),
        }
    }

    fn spawn_link(&self, stream: BoxedStream) -> (Link, mpsc::Sender<InputEvent>) {
        let (event_tx, event_rx) = mpsc::channel(self.config.write_queue_depth);
        let cancel = CancellationToken::new();
        let (read_half, write_half) = tokio::io::split(stream);

        let writer = tokio::spawn(write_loop(
            write_half,
            event_rx,
            self.session.clone(),
            cancel.clone(),
            self.config.keepalive_interval(),
        ));
        let reader = tokio::spawn(read_loop(read_half, self.session.clone(), cancel.clone()));

        (Link { cancel, reader, writer }, event_tx)
    }
}

/// Record an asynchronous link death and stop the sibling task.
fn report_loss(session: &Mutex<Session>, cancel: &CancellationToken, reason: String) {
    {
        let mut session = session.lock().expect("session mutex poisoned");
        if session.status().is_connected() {
            log::warn!("connection lost: {reason}");
            session.mark_lost(reason);
        }
    }
    cancel.cancel();
}

async fn write_loop(
    mut stream: WriteHalf<BoxedStream>,
    mut events: mpsc::Receiver<InputEvent>,
    session: Arc<Mutex<Session>>,
    cancel: CancellationToken,
    keepalive: Duration,
) {
    let mut ticker = tokio::time::interval(keepalive);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let frame = next_frame(&session, InputEvent::Ping);
                if !write_frame(&mut stream, &session, &cancel, frame).await {
                    break;
                }
            }
            maybe = events.recv() => match maybe {
                Some(event) => {
                    let frame = next_frame(&session, event);
                    if !write_frame(&mut stream, &session, &cancel, frame).await {
                        break;
                    }
                }
                // Queue dropped: the connector is shutting the link down.
                None => break,
            },
        }
    }
}

fn next_frame(session: &Mutex<Session>, event: InputEvent) -> Frame {
    let mut session = session.lock().expect("session mutex poisoned");
    Frame::new(session.next_sequence(), event)
}

/// Returns `false` when the link is dead and the loop should exit.
async fn write_frame(
    stream: &mut WriteHalf<BoxedStream>,
    session: &Mutex<Session>,
    cancel: &CancellationToken,
    frame: Frame,
) -> bool {
    let bytes = match frame.encode() {
        Ok(bytes) => bytes,
        Err(err) => {
            // An unencodable frame is dropped; the link stays up.
            log::warn!("failed to encode outbound frame {}: {err}", frame.sequence);
            return true;
        }
    };
    if let Err(err) = stream.write_all(&bytes).await {
        report_loss(session, cancel, format!("write failed: {err}"));
        return false;
    }
    if let Err(err) = stream.flush().await {
        report_loss(session, cancel, format!("flush failed: {err}"));
        return false;
    }
    true
}

async fn read_loop(
    mut stream: ReadHalf<BoxedStream>,
    session: Arc<Mutex<Session>>,
    cancel: CancellationToken,
) {
    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 8192];
    'link: loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = stream.read(&mut buf) => match result {
                Ok(0) => {
                    report_loss(&session, &cancel, "connection closed by peer".into());
                    break;
                }
                Ok(n) => {
                    decoder.push(&buf[..n]);
                    loop {
                        match decoder.next_frame() {
                            Ok(Some(frame)) => match frame.event {
                                InputEvent::Pong => {
                                    log::debug!("pong for frame {}", frame.sequence);
                                }
                                other => {
                                    log::debug!("ignoring unexpected frame from peer: {other:?}");
                                }
                            },
                            Ok(None) => break,
                            Err(err) => {
                                report_loss(
                                    &session,
                                    &cancel,
                                    format!("malformed frame from peer: {err}"),
                                );
                                break 'link;
                            }
                        }
                    }
                }
                Err(err) => {
                    report_loss(&session, &cancel, format!("read failed: {err}"));
                    break;
                }
            },
        }
    }
}

fn map_dial_error(endpoint: &Endpoint, err: io::Error) -> BridgeError {
    let endpoint = endpoint.to_string();
    match err.kind() {
        io::ErrorKind::ConnectionRefused => BridgeError::ConnectRefused { endpoint },
        io::ErrorKind::NetworkUnreachable | io::ErrorKind::HostUnreachable => {
            BridgeError::NetworkUnreachable { endpoint }
        }
        io::ErrorKind::TimedOut => BridgeError::ConnectTimeout { endpoint },
        _ => BridgeError::Transport { message: format!("connect to {endpoint} failed: {err}") },
    }
}

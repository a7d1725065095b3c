use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lanlight_frame::{decode_response, Acknowledgement, FromResponsePayload, Request, Response};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::error::{Result, SessionError};
use crate::mailbox::{Delivery, Mailbox, Registration};

/// Default window a request waits for its response.
pub const DEFAULT_RESPONSE_EXPIRY: Duration = Duration::from_secs(5);

/// Default receive buffer; larger than any response this client decodes.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 1024;

/// Communicator tuning.
#[derive(Debug, Clone)]
pub struct CommunicatorConfig {
    /// How long a request waits for its response, and how long an unclaimed
    /// response stays claimable.
    pub response_expiry: Duration,
    /// Receive buffer size in bytes. Longer datagrams are truncated.
    pub recv_buffer_size: usize,
}

impl Default for CommunicatorConfig {
    fn default() -> Self {
        Self {
            response_expiry: DEFAULT_RESPONSE_EXPIRY,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}

/// One UDP session with one device.
///
/// A single background task owns the receive side of the socket and hands
/// every decoded response to the [`Mailbox`], where callers waiting on a
/// sequence number pick it up. Any number of requests may be in flight at
/// once through a shared reference.
#[derive(Debug)]
pub struct Communicator {
    socket: Arc<UdpSocket>,
    remote: SocketAddr,
    mailbox: Arc<Mailbox>,
    config: CommunicatorConfig,
    shutdown: CancellationToken,
}

impl Communicator {
    /// Open a session with the default configuration.
    pub async fn connect(remote: SocketAddr) -> Result<Self> {
        Self::connect_with_config(remote, CommunicatorConfig::default()).await
    }

    /// Bind an ephemeral local port, connect it to `remote` and start the
    /// reader task. Must be called within a tokio runtime.
    pub async fn connect_with_config(
        remote: SocketAddr,
        config: CommunicatorConfig,
    ) -> Result<Self> {
        let local: SocketAddr = if remote.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(remote).await?;
        let socket = Arc::new(socket);
        info!(local = %socket.local_addr()?, %remote, "session opened");

        let mailbox = Mailbox::new(config.response_expiry);
        let shutdown = CancellationToken::new();

        tokio::spawn(read_loop(
            Arc::clone(&socket),
            Arc::clone(&mailbox),
            shutdown.clone(),
            config.recv_buffer_size.max(1),
        ));

        Ok(Self {
            socket,
            remote,
            mailbox,
            config,
            shutdown,
        })
    }

    pub fn remote(&self) -> SocketAddr {
        self.remote
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn config(&self) -> &CommunicatorConfig {
        &self.config
    }

    /// Send `request`. When it asks for an acknowledgement, wait for it.
    ///
    /// Fire-and-forget requests return as soon as the datagram is sent.
    pub async fn send(&self, request: &Request, cancel: &CancellationToken) -> Result<()> {
        self.transmit(request).await?;
        if request.ack_required {
            let response = self.await_response(request.sequence, cancel).await?;
            extract::<Acknowledgement>(response)?;
        }
        Ok(())
    }

    /// Send `request` and wait for the response carrying its sequence number.
    ///
    /// Fails with [`SessionError::UnexpectedPayload`] when the matched
    /// response is not a `T`.
    pub async fn send_and_receive<T: FromResponsePayload>(
        &self,
        request: &Request,
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.transmit(request).await?;
        let response = self.await_response(request.sequence, cancel).await?;
        extract(response)
    }

    /// Wait for the response carrying `sequence`.
    ///
    /// A matching response received earlier and still within the expiry
    /// window is returned immediately. Otherwise the wait ends at the first
    /// of: a match, `cancel` firing, or the expiry window elapsing.
    pub async fn await_response(
        &self,
        sequence: u8,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let expiry = self.config.response_expiry;
        let deadline = tokio::time::Instant::now() + expiry;

        let mut waiter = match self.mailbox.register(sequence, Instant::now()) {
            Registration::Ready(response) => {
                trace!(sequence, "claimed early response");
                return Ok(response);
            }
            Registration::Waiting(waiter) => waiter,
            Registration::Closed => return Err(SessionError::ReaderStopped),
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(sequence, "wait cancelled by caller");
                Err(SessionError::Cancelled)
            }
            response = waiter.recv() => response.ok_or(SessionError::ReaderStopped),
            _ = tokio::time::sleep_until(deadline) => {
                debug!(sequence, ?expiry, "response timed out");
                Err(SessionError::Timeout(expiry))
            }
        }
    }

    async fn transmit(&self, request: &Request) -> Result<()> {
        let bytes = request.to_bytes()?;
        self.socket.send(&bytes).await?;
        debug!(
            sequence = request.sequence,
            command = request.command.name(),
            len = bytes.len(),
            "request sent"
        );
        Ok(())
    }
}

impl Drop for Communicator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn extract<T: FromResponsePayload>(response: Response) -> Result<T> {
    T::from_payload(response.payload).map_err(|other| SessionError::UnexpectedPayload {
        expected: T::KIND,
        actual: other.kind(),
    })
}

/// Pause after an unexpected receive error before polling the socket again.
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Receive errors expected on a connected UDP socket.
///
/// ICMP unreachable reports for an earlier datagram surface on the next
/// receive as `ConnectionRefused`, `HostUnreachable` or `NetworkUnreachable`.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::NetworkDown
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}

async fn read_loop(
    socket: Arc<UdpSocket>,
    mailbox: Arc<Mailbox>,
    shutdown: CancellationToken,
    buffer_size: usize,
) {
    let mut buf = vec![0u8; buffer_size];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv(&mut buf) => received,
        };

        let len = match received {
            Ok(len) => len,
            Err(err) if is_transient(&err) => {
                debug!(error = %err, "transient receive error");
                continue;
            }
            Err(err) => {
                // Only shutdown stops the reader; waiters time out on their own.
                warn!(error = %err, "receive failed");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(RECV_ERROR_BACKOFF) => continue,
                }
            }
        };

        let Some(response) = decode_response(&buf[..len]) else {
            continue;
        };

        let sequence = response.sequence;
        let kind = response.payload.kind();
        match mailbox.deliver(response) {
            Delivery::Waiter => trace!(sequence, kind, "response delivered"),
            Delivery::Parked => trace!(sequence, kind, "response parked"),
            Delivery::Dropped => break,
        }
    }

    mailbox.close();
    debug!("reader stopped");
}

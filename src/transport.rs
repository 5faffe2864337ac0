use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::endpoint::Endpoint;
use crate::error::TransportError;

/// Receive buffer for a single reply datagram. The info response fits well
/// under this; a reply that fills the buffer is treated as truncated
/// rather than silently cut short.
pub const RESPONSE_BUFFER_SIZE: usize = 2048;

const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Options recognized by [`Transport::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Deadline, in whole seconds, applied to every send and receive.
    /// Values below 1 fall back to 30 seconds.
    pub timeout_secs: i64,
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs < 1 {
            return Duration::from_secs(DEFAULT_TIMEOUT_SECS as u64);
        }
        Duration::from_secs(self.timeout_secs as u64)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One UDP association to one server, with a fixed per-operation deadline.
///
/// Moves single datagrams and nothing more; retry policy belongs to the
/// caller.
pub struct Transport {
    sock: UdpSocket,
    timeout: Duration,
}

impl Transport {
    /// Binds an ephemeral local socket and connects it to `endpoint`.
    pub async fn connect(
        endpoint: &Endpoint,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        let timeout_dur = config.timeout();

        // just arbitrarily bind any port, doesn't matter really
        let sock: UdpSocket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(TransportError::Bind)?;

        timeout(timeout_dur, sock.connect(endpoint.to_string()))
            .await
            .map_err(|_| TransportError::Timeout(timeout_dur))?
            .map_err(TransportError::Connect)?;

        Ok(Transport {
            sock,
            timeout: timeout_dur,
        })
    }

    /// Writes exactly one datagram.
    pub async fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        let sent = timeout(self.timeout, self.sock.send(payload))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
            .map_err(TransportError::Send)?;
        if sent != payload.len() {
            return Err(TransportError::ShortWrite {
                sent,
                len: payload.len(),
            });
        }
        Ok(())
    }

    /// Blocks for one reply datagram within the deadline and returns its
    /// bytes unparsed.
    pub async fn receive(&self) -> Result<Vec<u8>, TransportError> {
        let mut resp_buf: [u8; RESPONSE_BUFFER_SIZE] = [0u8; RESPONSE_BUFFER_SIZE];
        let received = timeout(self.timeout, self.sock.recv(&mut resp_buf))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))?
            .map_err(TransportError::Receive)?;
        if received == resp_buf.len() {
            return Err(TransportError::Oversize {
                limit: RESPONSE_BUFFER_SIZE,
            });
        }
        Ok(resp_buf[..received].to_vec())
    }
}

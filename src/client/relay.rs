use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::UdpSettings;
use crate::utils::error::RelayError;

/// Sends one payload to the store server and waits for its echo.
///
/// A fresh socket is bound for every call and dropped afterwards, so a
/// `Relay` is just the address and limits and can be cloned freely into
/// request handlers.
#[derive(Debug, Clone)]
pub struct Relay {
    target: SocketAddr,
    buffer_size: usize,
    reply_timeout: Duration,
}

impl Relay {
    pub fn new(target: SocketAddr, buffer_size: usize, reply_timeout: Duration) -> Self {
        Self {
            target,
            buffer_size,
            reply_timeout,
        }
    }

    /// Builds a relay aimed at the store server described by `settings`.
    pub async fn from_settings(settings: &UdpSettings) -> Result<Self, RelayError> {
        let target = tokio::net::lookup_host(settings.addr())
            .await?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    format!("no address for {}", settings.addr()),
                )
            })?;

        Ok(Self::new(
            target,
            settings.buffer_size,
            Duration::from_millis(settings.reply_timeout_ms),
        ))
    }

    /// Sends `payload` and returns the single reply datagram.
    ///
    /// Fails with [`RelayError::Timeout`] when no reply arrives within the
    /// configured deadline. Nothing is retried.
    pub async fn send(&self, payload: &[u8]) -> Result<Vec<u8>, RelayError> {
        if payload.len() > self.buffer_size {
            warn!(
                "Payload of {} bytes exceeds the {} byte datagram buffer and will be truncated",
                payload.len(),
                self.buffer_size
            );
        }

        let local: SocketAddr = if self.target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        // connected sockets only accept datagrams from the target
        socket.connect(self.target).await?;
        info!("Connection established {}", self.target);

        socket.send(payload).await?;

        let mut buf = vec![0u8; self.buffer_size];
        let n = timeout(self.reply_timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| RelayError::Timeout(self.reply_timeout))??;
        buf.truncate(n);

        info!(
            "Saved data: {} from address: {}",
            String::from_utf8_lossy(&buf),
            self.target
        );
        info!("Data transfer completed");
        Ok(buf)
    }
}

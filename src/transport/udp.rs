use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::{error, info, warn};

use crate::config::UdpSettings;
use crate::persistence::Persistence;

/// Receives form payloads as datagrams, stores them and echoes them back.
///
/// Datagrams are handled strictly one at a time in arrival order.
#[derive(Debug)]
pub struct StoreServer {
    socket: UdpSocket,
    persistence: Persistence,
    buffer_size: usize,
    echo_on_failure: bool,
}

impl StoreServer {
    /// Binds `addr` and prepares a server using the buffer size and echo
    /// policy from `settings`.
    pub async fn bind(
        addr: &str,
        persistence: Persistence,
        settings: &UdpSettings,
    ) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket,
            persistence,
            buffer_size: settings.buffer_size,
            echo_on_failure: settings.echo_on_failure,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Stores one payload and echoes it to `peer` unless the save failed and
    /// the echo policy says to stay silent. Returns whether an echo was sent.
    pub async fn handle_datagram(&self, payload: &[u8], peer: SocketAddr) -> io::Result<bool> {
        info!(
            "Received data: {} from: {}",
            String::from_utf8_lossy(payload),
            peer
        );

        // sled flushes to disk on every insert, keep that off the runtime threads
        let persistence = self.persistence.clone();
        let owned = payload.to_vec();
        let saved = match tokio::task::spawn_blocking(move || persistence.save_message(&owned))
            .await
        {
            Ok(Ok(record)) => {
                info!("Stored {} fields from {}", record.len(), peer);
                true
            }
            Ok(Err(e)) => {
                error!("Failed to save data from {}: {}", peer, e);
                false
            }
            Err(e) => {
                error!("Save task for {} did not complete: {}", peer, e);
                false
            }
        };

        if !saved && !self.echo_on_failure {
            warn!("Not acknowledging {} after failed save", peer);
            return Ok(false);
        }

        self.socket.send_to(payload, peer).await?;
        info!(
            "Send data: {} to: {}",
            String::from_utf8_lossy(payload),
            peer
        );
        Ok(true)
    }

    /// Receive loop. Only returns if the task running it is cancelled; the
    /// socket is released when the server is dropped.
    pub async fn run(self) {
        let mut buf = vec![0u8; self.buffer_size];
        loop {
            let (n, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    error!("Failed to receive datagram: {}", e);
                    continue;
                }
            };

            if let Err(e) = self.handle_datagram(&buf[..n], peer).await {
                error!("Failed to echo datagram to {}: {}", peer, e);
            }
        }
    }
}

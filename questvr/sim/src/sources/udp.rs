use anyhow::{Context, Result};
use api::{PosePacket, TrackingSource};
use log::{info, warn};
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};

/// Receives JSON [`PosePacket`]s, one per datagram.
pub struct UdpPoseSource {
    bind_address: String,
    socket: Option<UdpSocket>,
    buf: Vec<u8>,
}

impl UdpPoseSource {
    pub fn new(bind_address: String) -> Self {
        Self {
            bind_address,
            socket: None,
            buf: vec![0u8; 65535], // Max UDP size
        }
    }

    /// Address actually bound, once initialized.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }
}

impl TrackingSource for UdpPoseSource {
    fn initialize(&mut self) -> Result<()> {
        let socket = UdpSocket::bind(&self.bind_address)
            .with_context(|| format!("Failed to bind UDP socket on {}", self.bind_address))?;
        socket
            .set_nonblocking(true)
            .context("Failed to set non-blocking mode")?;

        info!("Listening for pose packets on {}", self.bind_address);
        self.socket = Some(socket);
        Ok(())
    }

    /// Drains every pending datagram and keeps the newest pose. A controller
    /// missing from the newest packet is taken from an older one in the same
    /// batch.
    fn poll(&mut self, _dt: f32) -> Result<Option<PosePacket>> {
        let Some(socket) = &self.socket else {
            return Ok(None);
        };

        let mut latest: Option<PosePacket> = None;
        loop {
            match socket.recv_from(&mut self.buf) {
                Ok((amt, src)) => match serde_json::from_slice::<PosePacket>(&self.buf[..amt]) {
                    Ok(mut packet) => {
                        if let Some(older) = latest.take() {
                            packet.left = packet.left.or(older.left);
                            packet.right = packet.right.or(older.right);
                        }
                        latest = Some(packet);
                    }
                    Err(e) => warn!("Failed to deserialize pose packet from {}: {}", src, e),
                },
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => return Err(e).context("Failed to receive pose packet"),
            }
        }

        Ok(latest)
    }

    fn unload(&mut self) {
        if self.socket.take().is_some() {
            info!("Closed pose socket on {}", self.bind_address);
        }
    }
}

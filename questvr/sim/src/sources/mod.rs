pub mod sway;
pub mod udp;

use anyhow::Result;
use api::{PosePacket, TrackingSource};
use common::{PoseSourceKind, SimConfig};
use sway::SwaySource;
use udp::UdpPoseSource;

pub enum PoseSource {
    Udp(UdpPoseSource),
    Sway(SwaySource),
}

impl TrackingSource for PoseSource {
    fn initialize(&mut self) -> Result<()> {
        match self {
            Self::Udp(s) => s.initialize(),
            Self::Sway(s) => s.initialize(),
        }
    }

    fn poll(&mut self, dt: f32) -> Result<Option<PosePacket>> {
        match self {
            Self::Udp(s) => s.poll(dt),
            Self::Sway(s) => s.poll(dt),
        }
    }

    fn unload(&mut self) {
        match self {
            Self::Udp(s) => s.unload(),
            Self::Sway(s) => s.unload(),
        }
    }
}

pub fn create_source(config: &SimConfig) -> PoseSource {
    match config.pose_source {
        PoseSourceKind::Udp => PoseSource::Udp(UdpPoseSource::new(config.listen_addr())),
        PoseSourceKind::Sway => PoseSource::Sway(SwaySource::new()),
    }
}

use anyhow::Result;
use api::{HeadPose, PosePacket, TrackingSource, DEFAULT_EYE_HEIGHT};
use glam::Vec3;
use log::info;
use std::f32::consts::TAU;

const PERIOD_SECS: f32 = 8.0;
const YAW_AMPLITUDE: f32 = 0.35; // radians
const PITCH_AMPLITUDE: f32 = 0.05;
const SWAY_AMPLITUDE: f32 = 0.05; // meters
const BOB_AMPLITUDE: f32 = 0.01;

/// Idle head motion for running without any tracking input: a slow look
/// left and right with a little body sway.
#[derive(Debug, Default)]
pub struct SwaySource {
    elapsed: f32,
}

impl SwaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose_at(t: f32) -> HeadPose {
        let phase = TAU * t / PERIOD_SECS;
        HeadPose {
            position: Vec3::new(
                SWAY_AMPLITUDE * phase.sin(),
                DEFAULT_EYE_HEIGHT + BOB_AMPLITUDE * (2.0 * phase).sin(),
                0.0,
            ),
            rotation: Vec3::new(
                PITCH_AMPLITUDE * (2.0 * phase).sin(),
                YAW_AMPLITUDE * phase.sin(),
                0.0,
            ),
        }
    }
}

impl TrackingSource for SwaySource {
    fn initialize(&mut self) -> Result<()> {
        info!("Generating idle head motion ({}s period)", PERIOD_SECS);
        self.elapsed = 0.0;
        Ok(())
    }

    fn poll(&mut self, dt: f32) -> Result<Option<PosePacket>> {
        self.elapsed += dt.max(0.0);
        Ok(Some(PosePacket::from_head(Self::pose_at(self.elapsed))))
    }

    fn unload(&mut self) {}
}

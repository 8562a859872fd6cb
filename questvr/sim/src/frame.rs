//! Per-frame plumbing between a tracking source and the runtime state.

use api::{ControllerState, Hand, HeadPose, PosePacket};
use common::{PoseFilter, VrState};

use crate::bridge::BridgeLibrary;

/// Anything tracking samples can be written into: the loaded bridge, or a
/// plain [`VrState`] when no library is involved.
pub trait PoseSink {
    fn update_head_pose(&mut self, pose: HeadPose);
    fn update_controller(&mut self, hand: Hand, state: &ControllerState);
}

impl PoseSink for BridgeLibrary {
    fn update_head_pose(&mut self, pose: HeadPose) {
        BridgeLibrary::update_head_pose(self, pose);
    }

    fn update_controller(&mut self, hand: Hand, state: &ControllerState) {
        BridgeLibrary::update_controller(self, hand, state);
    }
}

impl PoseSink for VrState {
    fn update_head_pose(&mut self, pose: HeadPose) {
        VrState::update_head_pose(self, pose.position, pose.rotation);
    }

    fn update_controller(&mut self, hand: Hand, state: &ControllerState) {
        VrState::update_controller(self, hand, *state);
    }
}

/// Pushes a received sample into `sink`, smoothing the head if enabled.
/// Controllers absent from the packet keep their current state.
pub fn apply_packet<S: PoseSink + ?Sized>(
    sink: &mut S,
    packet: &PosePacket,
    filter: Option<&mut PoseFilter>,
    dt: f32,
) {
    let head = match filter {
        Some(filter) => filter.apply(packet.head(), dt),
        None => packet.head(),
    };
    sink.update_head_pose(head);

    for hand in [Hand::Left, Hand::Right] {
        if let Some(state) = packet.controller(hand) {
            sink.update_controller(hand, state);
        }
    }
}

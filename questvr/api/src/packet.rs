use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{ControllerState, Hand, HeadPose};

/// One tracking sample as sent over the wire (JSON, one object per datagram).
///
/// Controllers are optional; an absent controller leaves the receiver's
/// current state for that hand untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosePacket {
    pub position: Vec3,
    /// (pitch, yaw, roll) in radians
    pub rotation: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<ControllerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<ControllerState>,
}

impl PosePacket {
    pub fn from_head(head: HeadPose) -> Self {
        Self {
            position: head.position,
            rotation: head.rotation,
            left: None,
            right: None,
        }
    }

    pub fn head(&self) -> HeadPose {
        HeadPose {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn controller(&self, hand: Hand) -> Option<&ControllerState> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }
}

use glam::{Vec2, Vec3};

use crate::{ControllerState, Hand, HeadPose, DEFAULT_EYE_HEIGHT};

/// Simulated runtime state for one session: head pose, both controllers and
/// the lifecycle flag.
///
/// Every accessor works regardless of the lifecycle flag; only the frame
/// bracketing calls look at it. Nothing is validated or clamped.
///
/// Nothing here logs. Callers that keep the state behind a lock report
/// transitions after releasing it.
#[derive(Debug, Clone, PartialEq)]
pub struct VrState {
    initialized: bool,
    head: HeadPose,
    left: ControllerState,
    right: ControllerState,
}

impl Default for VrState {
    fn default() -> Self {
        Self::new()
    }
}

impl VrState {
    pub fn new() -> Self {
        Self {
            initialized: false,
            head: HeadPose::default(),
            left: ControllerState::resting(Hand::Left),
            right: ControllerState::resting(Hand::Right),
        }
    }

    /// Marks the session live and puts the head back at standing eye height.
    /// Head X/Z, rotation and controller state are kept as they are.
    pub fn initialize(&mut self) -> bool {
        self.initialized = true;
        self.head.position.y = DEFAULT_EYE_HEIGHT;
        true
    }

    /// Clears the lifecycle flag. Pose and input values persist.
    pub fn shutdown(&mut self) {
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a frame should be rendered. Stands in for the wait/begin frame
    /// synchronization point of a real runtime.
    pub fn begin_frame(&self) -> bool {
        self.initialized
    }

    /// Closes the frame opened by [`VrState::begin_frame`]. Returns whether
    /// there was a live session to submit to; a no-op otherwise.
    pub fn end_frame(&self) -> bool {
        self.initialized
    }

    pub fn head_pose(&self) -> HeadPose {
        self.head
    }

    pub fn head_position(&self) -> Vec3 {
        self.head.position
    }

    /// (pitch, yaw, roll) in radians
    pub fn head_rotation(&self) -> Vec3 {
        self.head.rotation
    }

    pub fn controller(&self, hand: Hand) -> ControllerState {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }

    pub fn controller_position(&self, hand: Hand) -> Vec3 {
        self.controller(hand).position
    }

    pub fn is_trigger_pressed(&self, hand: Hand) -> bool {
        self.controller(hand).trigger
    }

    pub fn is_grip_pressed(&self, hand: Hand) -> bool {
        self.controller(hand).grip
    }

    pub fn thumbstick(&self, hand: Hand) -> Vec2 {
        self.controller(hand).thumbstick
    }

    /// Tracking injection point. Overwrites the head pose whether or not the
    /// session is initialized.
    pub fn update_head_pose(&mut self, position: Vec3, rotation: Vec3) {
        self.head = HeadPose { position, rotation };
    }

    /// Controller counterpart of [`VrState::update_head_pose`].
    pub fn update_controller(&mut self, hand: Hand, state: ControllerState) {
        *self.controller_mut(hand) = state;
    }

    fn controller_mut(&mut self, hand: Hand) -> &mut ControllerState {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }
}

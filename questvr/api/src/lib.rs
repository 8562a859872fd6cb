mod packet;
pub use packet::PosePacket;

use anyhow::Result;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::ffi::c_char;

/// Standing eye height in meters used whenever the head pose is (re)initialized.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

/// Controller selector. On the C boundary index 0 is the left hand and any
/// other index selects the right hand.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left = 0,
    Right = 1,
}

impl Hand {
    pub fn from_index(index: i32) -> Self {
        if index == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    pub fn index(self) -> i32 {
        self as i32
    }
}

/// Eye selector, same indexing convention as [`Hand`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eye {
    Left = 0,
    Right = 1,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    pub fn from_index(index: i32) -> Self {
        if index == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    pub fn index(self) -> i32 {
        self as i32
    }
}

/// Head placement: position in meters, rotation as (pitch, yaw, roll) in radians.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for HeadPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0),
            rotation: Vec3::ZERO,
        }
    }
}

/// Everything the simulated runtime knows about one hand controller.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub position: Vec3,
    #[serde(default)]
    pub trigger: bool,
    #[serde(default)]
    pub grip: bool,
    /// Stick axes, nominally in [-1, 1]. Not clamped.
    #[serde(default)]
    pub thumbstick: Vec2,
}

impl ControllerState {
    /// Resting placement in front of the user at waist height, nothing pressed.
    pub fn resting(hand: Hand) -> Self {
        let x = match hand {
            Hand::Left => -0.3,
            Hand::Right => 0.3,
        };
        Self {
            position: Vec3::new(x, 1.0, -0.5),
            trigger: false,
            grip: false,
            thumbstick: Vec2::ZERO,
        }
    }
}

/// 4x4 matrix in column-major order, as handed to OpenGL-style hosts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub cols: [f32; 16],
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Self {
        Self {
            cols: m.to_cols_array(),
        }
    }
}

/// log level forwarded to the host
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Host-side sink for bridge log records. Both strings are NUL-terminated and
/// only valid for the duration of the call.
pub type LogCallback =
    extern "C" fn(level: LogLevel, target: *const c_char, message: *const c_char);

/// Passed by the host to `questvr_initialize`. May be null.
///
/// The log callback may call back into the bridge; no bridge lock is held
/// while it runs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostContext {
    pub log_callback: Option<LogCallback>,
}

/// A producer of simulated tracking data (network feed, scripted motion, ...).
pub trait TrackingSource {
    fn initialize(&mut self) -> Result<()>;
    /// Newest pose produced since the previous poll, if any. `dt` is the frame
    /// time in seconds.
    fn poll(&mut self, dt: f32) -> Result<Option<PosePacket>>;
    fn unload(&mut self);
}

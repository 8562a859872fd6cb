//! C ABI over one process-wide simulated VR session.
//!
//! Stands in for a full OpenXR integration: no runtime is loaded, poses come
//! from `questvr_update_head_pose` / `questvr_update_controller` and the
//! render geometry is fixed. Hand and eye arguments use 0 for left and any
//! other value for right.

mod host_logger;

use api::{HostContext, Matrix4};
use common::{ControllerState, Eye, EyeParameters, Hand, VrState};
use glam::{Vec2, Vec3};
use log::{debug, info, trace, warn};
use once_cell::sync::Lazy;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors that stay on this side of the boundary; they are logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Host logger already installed")]
    HostLoggerInstalled,
    #[error("Another logger is already registered in this process")]
    LoggerTaken,
}

const EYE_PARAMETERS: EyeParameters = EyeParameters::QUEST_3;

static STATE: Lazy<RwLock<VrState>> = Lazy::new(|| RwLock::new(VrState::new()));

// VrState holds plain values, so a writer that panicked cannot leave it half-updated.
// Guards are dropped before logging: the host callback may call back into this library.
fn read_state() -> RwLockReadGuard<'static, VrState> {
    STATE.read().unwrap_or_else(|e| e.into_inner())
}

fn write_state() -> RwLockWriteGuard<'static, VrState> {
    STATE.write().unwrap_or_else(|e| e.into_inner())
}

/// Initializes the simulated runtime.
///
/// # Safety
///
/// `context` must be null or point to a valid [`HostContext`] for the
/// duration of the call.
#[no_mangle]
pub unsafe extern "C" fn questvr_initialize(context: *const HostContext) -> bool {
    if let Some(callback) = context.as_ref().and_then(|ctx| ctx.log_callback) {
        match host_logger::install(callback) {
            Ok(()) => debug!("Host log callback installed"),
            Err(BridgeError::HostLoggerInstalled) => {
                debug!("Host log callback already installed, keeping the first one")
            }
            Err(e) => warn!("Cannot forward logs to host: {}", e),
        }
    }

    info!("Initializing OpenXR bridge (simulation mode)");
    let (was_initialized, initialized) = {
        let mut state = write_state();
        (state.is_initialized(), state.initialize())
    };
    if was_initialized {
        warn!("Already initialized");
    }
    info!("VR state initialized (simulation mode)");
    initialized
}

#[no_mangle]
pub extern "C" fn questvr_shutdown() {
    write_state().shutdown();
    info!("Shutting down VR state");
}

#[no_mangle]
pub extern "C" fn questvr_is_initialized() -> bool {
    read_state().is_initialized()
}

#[no_mangle]
pub extern "C" fn questvr_begin_frame() -> bool {
    read_state().begin_frame()
}

#[no_mangle]
pub extern "C" fn questvr_end_frame() {
    let submitted = read_state().end_frame();
    if submitted {
        trace!("Frame submitted");
    }
}

/// Head position in meters.
#[no_mangle]
pub extern "C" fn questvr_get_head_position() -> Vec3 {
    read_state().head_position()
}

/// Head rotation as (pitch, yaw, roll) in radians.
#[no_mangle]
pub extern "C" fn questvr_get_head_rotation() -> Vec3 {
    read_state().head_rotation()
}

#[no_mangle]
pub extern "C" fn questvr_get_controller_position(hand: i32) -> Vec3 {
    read_state().controller_position(Hand::from_index(hand))
}

#[no_mangle]
pub extern "C" fn questvr_is_trigger_pressed(hand: i32) -> bool {
    read_state().is_trigger_pressed(Hand::from_index(hand))
}

#[no_mangle]
pub extern "C" fn questvr_is_grip_pressed(hand: i32) -> bool {
    read_state().is_grip_pressed(Hand::from_index(hand))
}

#[no_mangle]
pub extern "C" fn questvr_get_thumbstick(hand: i32) -> Vec2 {
    read_state().thumbstick(Hand::from_index(hand))
}

/// Injects a head pose from an external tracking source or test driver.
#[no_mangle]
pub extern "C" fn questvr_update_head_pose(px: f32, py: f32, pz: f32, rx: f32, ry: f32, rz: f32) {
    write_state().update_head_pose(Vec3::new(px, py, pz), Vec3::new(rx, ry, rz));
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn questvr_update_controller(
    hand: i32,
    px: f32,
    py: f32,
    pz: f32,
    trigger: bool,
    grip: bool,
    stick_x: f32,
    stick_y: f32,
) {
    write_state().update_controller(
        Hand::from_index(hand),
        ControllerState {
            position: Vec3::new(px, py, pz),
            trigger,
            grip,
            thumbstick: Vec2::new(stick_x, stick_y),
        },
    );
}

/// Recommended eye texture width in pixels.
#[no_mangle]
pub extern "C" fn questvr_get_eye_width() -> i32 {
    EYE_PARAMETERS.render_width as i32
}

#[no_mangle]
pub extern "C" fn questvr_get_eye_height() -> i32 {
    EYE_PARAMETERS.render_height as i32
}

/// X offset of the eye from the head center, in meters.
#[no_mangle]
pub extern "C" fn questvr_get_eye_offset(eye: i32) -> f32 {
    EYE_PARAMETERS.eye_offset(Eye::from_index(eye))
}

/// Column-major projection matrix for `eye`. Clip planes are not validated.
#[no_mangle]
pub extern "C" fn questvr_get_projection_matrix(
    eye: i32,
    near_clip: f32,
    far_clip: f32,
) -> Matrix4 {
    EYE_PARAMETERS.projection_matrix(Eye::from_index(eye), near_clip, far_clip)
}

#[no_mangle]
pub extern "C" fn questvr_get_ipd() -> f32 {
    EYE_PARAMETERS.ipd
}

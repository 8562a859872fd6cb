//! Dynamically loaded bridge library, called the way an engine host would.

use anyhow::{Context, Result};
use api::{ControllerState, Eye, Hand, HeadPose, HostContext, LogLevel, Matrix4};
use glam::{Vec2, Vec3};
use libloading::{Library, Symbol};
use log::{info, log};
use std::ffi::{c_char, CStr};
use std::path::Path;

type InitializeFn = unsafe extern "C" fn(*const HostContext) -> bool;
type VoidFn = unsafe extern "C" fn();
type BoolFn = unsafe extern "C" fn() -> bool;
type Vec3Fn = unsafe extern "C" fn() -> Vec3;
type HandVec3Fn = unsafe extern "C" fn(i32) -> Vec3;
type HandBoolFn = unsafe extern "C" fn(i32) -> bool;
type HandVec2Fn = unsafe extern "C" fn(i32) -> Vec2;
type UpdateHeadPoseFn = unsafe extern "C" fn(f32, f32, f32, f32, f32, f32);
type UpdateControllerFn = unsafe extern "C" fn(i32, f32, f32, f32, bool, bool, f32, f32);
type IntFn = unsafe extern "C" fn() -> i32;
type FloatFn = unsafe extern "C" fn() -> f32;
type EyeOffsetFn = unsafe extern "C" fn(i32) -> f32;
type ProjectionFn = unsafe extern "C" fn(i32, f32, f32) -> Matrix4;

/// Function table resolved from the bridge shared library.
///
/// Every pointer was resolved from `_library`, which lives as long as the
/// table, and has the signature the bridge exports. That is what makes the
/// `unsafe` calls in the wrappers below sound.
pub struct BridgeLibrary {
    initialize: InitializeFn,
    shutdown: VoidFn,
    is_initialized: BoolFn,
    begin_frame: BoolFn,
    end_frame: VoidFn,
    get_head_position: Vec3Fn,
    get_head_rotation: Vec3Fn,
    get_controller_position: HandVec3Fn,
    is_trigger_pressed: HandBoolFn,
    is_grip_pressed: HandBoolFn,
    get_thumbstick: HandVec2Fn,
    update_head_pose: UpdateHeadPoseFn,
    update_controller: UpdateControllerFn,
    get_eye_width: IntFn,
    get_eye_height: IntFn,
    get_eye_offset: EyeOffsetFn,
    get_projection_matrix: ProjectionFn,
    get_ipd: FloatFn,
    _library: Library,
}

unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> Result<T> {
    let c_name = format!("{}\0", name);
    let sym: Symbol<T> = library
        .get(c_name.as_bytes())
        .with_context(|| format!("Bridge library does not export {}", name))?;
    Ok(*sym)
}

impl BridgeLibrary {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading bridge library from {:?}", path);
        unsafe {
            let library = Library::new(path)
                .with_context(|| format!("Failed to load bridge library {:?}", path))?;

            Ok(Self {
                initialize: symbol(&library, "questvr_initialize")?,
                shutdown: symbol(&library, "questvr_shutdown")?,
                is_initialized: symbol(&library, "questvr_is_initialized")?,
                begin_frame: symbol(&library, "questvr_begin_frame")?,
                end_frame: symbol(&library, "questvr_end_frame")?,
                get_head_position: symbol(&library, "questvr_get_head_position")?,
                get_head_rotation: symbol(&library, "questvr_get_head_rotation")?,
                get_controller_position: symbol(&library, "questvr_get_controller_position")?,
                is_trigger_pressed: symbol(&library, "questvr_is_trigger_pressed")?,
                is_grip_pressed: symbol(&library, "questvr_is_grip_pressed")?,
                get_thumbstick: symbol(&library, "questvr_get_thumbstick")?,
                update_head_pose: symbol(&library, "questvr_update_head_pose")?,
                update_controller: symbol(&library, "questvr_update_controller")?,
                get_eye_width: symbol(&library, "questvr_get_eye_width")?,
                get_eye_height: symbol(&library, "questvr_get_eye_height")?,
                get_eye_offset: symbol(&library, "questvr_get_eye_offset")?,
                get_projection_matrix: symbol(&library, "questvr_get_projection_matrix")?,
                get_ipd: symbol(&library, "questvr_get_ipd")?,
                _library: library,
            })
        }
    }

    pub fn initialize(&self, context: &HostContext) -> bool {
        unsafe { (self.initialize)(context) }
    }

    pub fn shutdown(&self) {
        unsafe { (self.shutdown)() }
    }

    pub fn is_initialized(&self) -> bool {
        unsafe { (self.is_initialized)() }
    }

    pub fn begin_frame(&self) -> bool {
        unsafe { (self.begin_frame)() }
    }

    pub fn end_frame(&self) {
        unsafe { (self.end_frame)() }
    }

    pub fn head_pose(&self) -> HeadPose {
        unsafe {
            HeadPose {
                position: (self.get_head_position)(),
                rotation: (self.get_head_rotation)(),
            }
        }
    }

    pub fn controller(&self, hand: Hand) -> ControllerState {
        let index = hand.index();
        unsafe {
            ControllerState {
                position: (self.get_controller_position)(index),
                trigger: (self.is_trigger_pressed)(index),
                grip: (self.is_grip_pressed)(index),
                thumbstick: (self.get_thumbstick)(index),
            }
        }
    }

    pub fn update_head_pose(&self, pose: HeadPose) {
        let (p, r) = (pose.position, pose.rotation);
        unsafe { (self.update_head_pose)(p.x, p.y, p.z, r.x, r.y, r.z) }
    }

    pub fn update_controller(&self, hand: Hand, state: &ControllerState) {
        let p = state.position;
        unsafe {
            (self.update_controller)(
                hand.index(),
                p.x,
                p.y,
                p.z,
                state.trigger,
                state.grip,
                state.thumbstick.x,
                state.thumbstick.y,
            )
        }
    }

    pub fn eye_size(&self) -> (i32, i32) {
        unsafe { ((self.get_eye_width)(), (self.get_eye_height)()) }
    }

    pub fn eye_offset(&self, eye: Eye) -> f32 {
        unsafe { (self.get_eye_offset)(eye.index()) }
    }

    pub fn projection_matrix(&self, eye: Eye, near: f32, far: f32) -> Matrix4 {
        unsafe { (self.get_projection_matrix)(eye.index(), near, far) }
    }

    pub fn ipd(&self) -> f32 {
        unsafe { (self.get_ipd)() }
    }
}

/// Log callback handed to the bridge; routes its records into this
/// process's logger under the bridge's own target.
pub extern "C" fn forward_bridge_log(
    level: LogLevel,
    target: *const c_char,
    message: *const c_char,
) {
    unsafe {
        let target_str = CStr::from_ptr(target).to_str().unwrap_or("questvr");
        let message_str = CStr::from_ptr(message).to_str().unwrap_or("");

        log!(target: target_str, log::Level::from(level), "{}", message_str);
    }
}

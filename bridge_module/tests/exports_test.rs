//! Exercises the exported C surface in-process.
//!
//! All tests share the library's single session, so each one takes `SERIAL`
//! and starts from a known lifecycle state.

use api::{HostContext, LogLevel};
use glam::{Vec2, Vec3};
use questvr::*;
use std::ffi::{c_char, CStr};
use std::sync::{Mutex, MutexGuard};

static SERIAL: Mutex<()> = Mutex::new(());
static CAPTURED: Mutex<Vec<(LogLevel, String, String)>> = Mutex::new(Vec::new());

extern "C" fn capture_log(level: LogLevel, target: *const c_char, message: *const c_char) {
    let (target, message) = unsafe {
        (
            CStr::from_ptr(target).to_string_lossy().into_owned(),
            CStr::from_ptr(message).to_string_lossy().into_owned(),
        )
    };
    CAPTURED
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push((level, target, message));
}

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

fn initialize() -> bool {
    let context = HostContext {
        log_callback: Some(capture_log),
    };
    unsafe { questvr_initialize(&context) }
}

#[test]
fn test_lifecycle() {
    let _guard = serial();

    assert!(initialize());
    assert!(questvr_is_initialized());
    assert!(questvr_begin_frame());
    questvr_end_frame();

    questvr_shutdown();
    assert!(!questvr_is_initialized());
    assert!(!questvr_begin_frame());
    questvr_end_frame();
}

#[test]
fn test_null_context_is_accepted() {
    let _guard = serial();

    assert!(unsafe { questvr_initialize(std::ptr::null()) });
    assert!(questvr_is_initialized());
}

#[test]
fn test_head_pose_round_trip_after_shutdown() {
    let _guard = serial();

    initialize();
    questvr_shutdown();
    questvr_update_head_pose(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);

    assert_eq!(questvr_get_head_position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(questvr_get_head_rotation(), Vec3::new(0.1, 0.2, 0.3));

    // Re-initializing puts the head back at eye height only
    assert!(initialize());
    assert_eq!(questvr_get_head_position(), Vec3::new(1.0, 1.6, 3.0));
    assert_eq!(questvr_get_head_rotation(), Vec3::new(0.1, 0.2, 0.3));
}

#[test]
fn test_controller_input() {
    let _guard = serial();

    questvr_update_controller(1, 0.2, 1.1, -0.4, true, true, 0.5, -0.5);
    assert!(questvr_is_trigger_pressed(1));
    assert!(questvr_is_grip_pressed(1));
    assert_eq!(questvr_get_thumbstick(1), Vec2::new(0.5, -0.5));
    assert!(!questvr_is_trigger_pressed(0));
    assert_eq!(questvr_get_thumbstick(0), Vec2::ZERO);

    // Any non-zero index is the right hand
    assert_eq!(questvr_get_controller_position(5), Vec3::new(0.2, 1.1, -0.4));

    questvr_update_controller(1, 0.3, 1.0, -0.5, false, false, 0.0, 0.0);
}

#[test]
fn test_render_geometry() {
    assert_eq!(questvr_get_eye_width(), 1680);
    assert_eq!(questvr_get_eye_height(), 1760);
    assert_eq!(questvr_get_ipd(), 0.063);
    assert_eq!(questvr_get_eye_offset(0), -questvr_get_eye_offset(1));
    assert!((questvr_get_eye_offset(1) - 0.0315).abs() < 1e-7);
}

#[test]
fn test_projection_matrix() {
    let left = questvr_get_projection_matrix(0, 0.1, 100.0).cols;
    let right = questvr_get_projection_matrix(1, 0.1, 100.0).cols;

    for m in [&left, &right] {
        for i in [1, 2, 3, 4, 6, 7, 12, 13, 15] {
            assert_eq!(m[i], 0.0);
        }
        assert_eq!(m[11], -1.0);
    }
    assert!((left[8] + right[8]).abs() < 1e-7);
    assert!((left[0] - 0.2 / 0.19).abs() < 1e-4);
}

#[test]
fn test_logs_reach_host_callback() {
    let _guard = serial();

    initialize();

    let captured = CAPTURED.lock().unwrap_or_else(|e| e.into_inner());
    assert!(captured
        .iter()
        .any(|(level, _, message)| *level == LogLevel::Info && message.contains("initialized")));
}

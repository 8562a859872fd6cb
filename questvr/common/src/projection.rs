//! Per-eye render geometry and asymmetric stereo projection.
//!
//! Matrices follow the OpenGL convention: right-handed view space looking down
//! -Z, clip-space depth in [-1, 1], column-major storage.

use glam::{Mat4, Vec4};

use crate::{Eye, Matrix4};

/// Scale applied to the nose-side frustum extent of each eye.
///
/// Rough stand-in for the overlap between the two eyes' fields of view; it is
/// not derived from any lens model. The left eye is narrowed on its right
/// side, the right eye on its left side.
pub const NASAL_NARROWING: f32 = 0.9;

/// Frustum half-angles in degrees, measured from the view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

/// Frustum extents on the near plane, in view-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Frustum {
    /// Off-axis perspective projection (the `glFrustum` matrix).
    ///
    /// Inputs are not checked: `near == far` or a zero-width frustum produce
    /// non-finite entries.
    pub fn projection(&self, near: f32, far: f32) -> Mat4 {
        let width = self.right - self.left;
        let height = self.top - self.bottom;
        let depth = far - near;

        Mat4::from_cols(
            Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
            Vec4::new(
                (self.right + self.left) / width,
                (self.top + self.bottom) / height,
                -(far + near) / depth,
                -1.0,
            ),
            Vec4::new(0.0, 0.0, -(2.0 * far * near) / depth, 0.0),
        )
    }
}

/// Fixed optical description of the headset, shared by both eyes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeParameters {
    /// Recommended per-eye render target size in pixels.
    pub render_width: u32,
    pub render_height: u32,
    /// Interpupillary distance in meters.
    pub ipd: f32,
    pub fov: FieldOfView,
    pub nasal_narrowing: f32,
}

impl Default for EyeParameters {
    fn default() -> Self {
        Self::QUEST_3
    }
}

impl EyeParameters {
    pub const QUEST_3: Self = Self {
        render_width: 1680,
        render_height: 1760,
        ipd: 0.063,
        fov: FieldOfView {
            left: 45.0,
            right: 45.0,
            up: 50.0,
            down: 55.0,
        },
        nasal_narrowing: NASAL_NARROWING,
    };

    /// Lateral displacement of the eye from the head origin, in meters.
    pub fn eye_offset(&self, eye: Eye) -> f32 {
        match eye {
            Eye::Left => -self.ipd / 2.0,
            Eye::Right => self.ipd / 2.0,
        }
    }

    pub fn frustum(&self, eye: Eye, near: f32) -> Frustum {
        let tan_left = self.fov.left.to_radians().tan();
        let tan_right = self.fov.right.to_radians().tan();
        let tan_up = self.fov.up.to_radians().tan();
        let tan_down = self.fov.down.to_radians().tan();

        let (left, right) = match eye {
            Eye::Left => (
                -tan_left * near,
                tan_right * near * self.nasal_narrowing,
            ),
            Eye::Right => (
                -tan_left * near * self.nasal_narrowing,
                tan_right * near,
            ),
        };

        Frustum {
            left,
            right,
            top: tan_up * near,
            bottom: -tan_down * near,
        }
    }

    pub fn projection(&self, eye: Eye, near: f32, far: f32) -> Mat4 {
        self.frustum(eye, near).projection(near, far)
    }

    pub fn projection_matrix(&self, eye: Eye, near: f32, far: f32) -> Matrix4 {
        self.projection(eye, near, far).into()
    }
}

//! Pointer-driven orientation of the point-cloud group.
//!
//! Each frame the group's angles close a fixed fraction of the gap to the
//! pointer target (exponential damping), the pitch is clamped, and the yaw
//! gets a small constant nudge so the field keeps turning on its own.

use crate::constants::{AUTO_ROTATE_PER_FRAME, PITCH_LIMIT, POINTER_TARGET_SCALE, ROTATION_DAMPING};
use glam::Mat4;

/// Target angles derived from the most recent pointer sample.
///
/// `x` drives the yaw (`rotation.y`) and `y` drives the pitch (`rotation.x`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTarget {
    pub x: f32,
    pub y: f32,
}

impl PointerTarget {
    /// Map client coordinates to `[-1, 1]` per axis and scale by
    /// [`POINTER_TARGET_SCALE`]. Returns `None` for a zero-sized viewport or
    /// non-finite coordinates.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) || !client_x.is_finite() || !client_y.is_finite() {
            return None;
        }
        let nx = (client_x / width * 2.0 - 1.0).clamp(-1.0, 1.0);
        let ny = (client_y / height * 2.0 - 1.0).clamp(-1.0, 1.0);
        Some(Self {
            x: nx * POINTER_TARGET_SCALE,
            y: ny * POINTER_TARGET_SCALE,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationParams {
    /// Fraction of the remaining distance covered per frame, `(0, 1]`.
    pub damping: f32,
    /// Radians added to the yaw after damping, every frame.
    pub auto_rotate: f32,
    /// Symmetric clamp on the pitch.
    pub pitch_limit: f32,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            damping: ROTATION_DAMPING,
            auto_rotate: AUTO_ROTATE_PER_FRAME,
            pitch_limit: PITCH_LIMIT,
        }
    }
}

/// Group rotation in radians: `x` about the horizontal axis, `y` about the
/// vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    /// Advance one frame toward `target`.
    pub fn step(&mut self, target: PointerTarget, params: &OrientationParams) {
        self.y += (target.x - self.y) * params.damping;
        self.x += (target.y - self.x) * params.damping;
        self.x = self.x.clamp(-params.pitch_limit, params.pitch_limit);
        self.y += params.auto_rotate;
    }

    /// Rotation applied to the cloud, X then Y (matches an XYZ Euler order).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y)
    }
}

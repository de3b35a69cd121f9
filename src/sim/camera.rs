//! Trailing camera
//!
//! Exponential smoothing toward a fixed offset above and behind the actor.
//! Purely presentational, but it reads the committed actor position every tick.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_FOV_DEG, CAMERA_LERP, CAMERA_OFFSET, CAMERA_START};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    /// Point the camera looks at (the actor)
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Where the camera wants to be for a given actor position
    #[inline]
    pub fn desired_position(actor_pos: Vec3) -> Vec3 {
        actor_pos + CAMERA_OFFSET
    }

    /// Move a fraction of the way toward the desired position and look at the actor
    pub fn follow(&mut self, actor_pos: Vec3) {
        self.position = self
            .position
            .lerp(Self::desired_position(actor_pos), CAMERA_LERP);
        self.target = actor_pos;
    }

    /// Jump straight to the desired position (used on reset)
    pub fn snap_to(&mut self, actor_pos: Vec3) {
        self.position = Self::desired_position(actor_pos);
        self.target = actor_pos;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(CAMERA_FOV_DEG.to_radians(), aspect, 0.1, 500.0);
        proj * self.view_matrix()
    }
}

//! Coin Arena - A 3D coin-collecting arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (motion, collisions, pickups, layout, camera)
//! - `session`: Round flow (countdown, win/lose, level progression)
//! - `platform`: Input translation (keys and swipes into intents)
//! - `renderer`: Per-frame instance data for a GPU renderer
//! - `audio`: Sound cues driven by game events
//! - `persistence`: JSON save/load with backup rotation
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Gravity applied to vertical velocity every tick (units/tick²)
    pub const GRAVITY: f32 = 0.01;
    /// Horizontal velocity multiplier while airborne
    pub const AIR_DRAG: f32 = 0.99;
    /// Horizontal velocity multiplier while touching the ground
    pub const GROUND_FRICTION: f32 = 0.9;
    /// Resting height of the actor center (sphere radius above the ground plane)
    pub const GROUND_HEIGHT: f32 = 0.5;

    /// Velocity added per directional intent
    pub const MOVE_IMPULSE: f32 = 0.1;
    /// Vertical velocity set by a jump
    pub const JUMP_IMPULSE: f32 = 0.3;

    /// Actor sphere radius (also the half-extent of its bounding cube)
    pub const ACTOR_RADIUS: f32 = 0.5;
    pub const ACTOR_HALF_EXTENTS: Vec3 = Vec3::splat(ACTOR_RADIUS);
    pub const OBSTACLE_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);
    pub const COIN_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);

    /// Default arena half-width
    pub const DEFAULT_BOUNDARY: f32 = 20.0;
    /// Boundary wall thickness and height (visual only, the clamp contains the actor)
    pub const WALL_THICKNESS: f32 = 1.0;
    pub const WALL_HEIGHT: f32 = 2.0;

    /// Minimum planar distance between placed entities
    pub const MIN_SPACING: f32 = 2.0;
    /// Samples tried per placement before relaxing the spacing
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 200;
    /// Number of times the spacing is relaxed before the exhaustive scan
    pub const MAX_RELAXATIONS: u32 = 4;
    /// Spacing multiplier applied per relaxation
    pub const RELAX_FACTOR: f32 = 0.75;

    /// Camera offset from the actor (above and behind)
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(1.0, 5.0, 4.0);
    /// Per-tick interpolation factor toward the desired camera position
    pub const CAMERA_LERP: f32 = 0.1;
    /// Initial camera position before the first reset
    pub const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 10.0);
    /// Vertical field of view (degrees)
    pub const CAMERA_FOV_DEG: f32 = 60.0;

    /// Minimum swipe displacement in pixels
    pub const SWIPE_THRESHOLD_PX: f32 = 30.0;

    /// Coin spin speed for presentation (radians/tick)
    pub const COIN_SPIN_RATE: f32 = 0.05;
}

/// Distance between two points projected onto the ground (xz) plane
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Horizontal (xz) component of a vector
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.5, 0.0);
        let b = Vec3::new(3.0, 10.0, 4.0);
        assert!((planar_distance(a, b) - 5.0).abs() < 1e-6);
    }
}

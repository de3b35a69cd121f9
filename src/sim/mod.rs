//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - One tick per frame, per-tick units
//! - Seeded RNG only (layouts)
//! - Stable iteration order (by entity ID)

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod layout;
pub mod motion;
pub mod pickup;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use camera::CameraRig;
pub use collision::{Resolution, first_obstacle_hit, resolve};
pub use layout::{Layout, generate_layout};
pub use state::{
    Actor, ArenaBounds, Coin, GameEvent, GamePhase, Obstacle, RoundState, World,
};
pub use tick::{TickInput, autopilot_input, tick};

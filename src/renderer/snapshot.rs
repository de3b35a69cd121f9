//! Serializable view of a frame, for debugging dumps and external viewers

use glam::{Quat, Vec3};
use serde::Serialize;

use super::coin_spin;
use crate::sim::World;

#[derive(Debug, Clone, Serialize)]
pub struct CoinView {
    pub id: u32,
    pub position: Vec3,
    pub spin: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub actor_position: Option<Vec3>,
    pub actor_orientation: Option<Quat>,
    pub actor_grounded: bool,
    pub coins: Vec<CoinView>,
    pub obstacles: Vec<Vec3>,
    pub camera_position: Vec3,
}

impl FrameSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.time_ticks,
            actor_position: world.actor.map(|a| a.position),
            actor_orientation: world.actor.map(|a| a.orientation),
            actor_grounded: world.actor.is_some_and(|a| a.grounded),
            coins: world
                .coins
                .iter()
                .map(|c| CoinView {
                    id: c.id,
                    position: c.position,
                    spin: coin_spin(world.time_ticks, c.id),
                })
                .collect(),
            obstacles: world.obstacles.iter().map(|o| o.position).collect(),
            camera_position: world.camera.position,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

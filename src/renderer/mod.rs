//! Per-frame render data
//!
//! Turns the simulation state into instance and camera buffers for an
//! instanced renderer. No GPU device lives here; the window layer uploads
//! the bytes as-is.

pub mod instance;
pub mod snapshot;

pub use instance::{CameraUniform, InstanceRaw, MeshKind, colors};
pub use snapshot::FrameSnapshot;

use glam::{Mat4, Quat, Vec3};

use crate::consts::{ACTOR_RADIUS, COIN_SPIN_RATE};
use crate::sim::World;

/// Maximum number of instances per frame
pub const MAX_INSTANCES: usize = 512;
/// Side length of the ground plane
pub const GROUND_SIZE: f32 = 100.0;

/// Everything a frame needs to draw
#[derive(Debug, Clone)]
pub struct Frame {
    pub camera: CameraUniform,
    pub instances: Vec<InstanceRaw>,
}

impl Frame {
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Coin spin angle for presentation (coins are static in the simulation)
pub fn coin_spin(time_ticks: u64, coin_id: u32) -> f32 {
    (time_ticks as f32 + coin_id as f32 * 17.0) * COIN_SPIN_RATE
}

/// Build camera and instance buffers for the current world
pub fn build_frame(world: &World, aspect: f32) -> Frame {
    let mut instances = Vec::with_capacity(6 + world.obstacles.len() + world.coins.len());

    instances.push(InstanceRaw::new(
        Mat4::from_scale(Vec3::new(GROUND_SIZE, 1.0, GROUND_SIZE)),
        colors::GROUND,
        MeshKind::Plane,
    ));

    for wall in world.bounds.wall_boxes() {
        instances.push(InstanceRaw::new(
            Mat4::from_scale_rotation_translation(wall.size(), Quat::IDENTITY, wall.center),
            colors::WALL,
            MeshKind::Cube,
        ));
    }

    for obstacle in &world.obstacles {
        let b = obstacle.bounds();
        instances.push(InstanceRaw::new(
            Mat4::from_scale_rotation_translation(b.size(), Quat::IDENTITY, b.center),
            colors::OBSTACLE,
            MeshKind::Cube,
        ));
    }

    for coin in &world.coins {
        let spin = Quat::from_rotation_y(coin_spin(world.time_ticks, coin.id));
        instances.push(InstanceRaw::new(
            Mat4::from_scale_rotation_translation(coin.bounds().size(), spin, coin.position),
            colors::COIN,
            MeshKind::Coin,
        ));
    }

    if let Some(actor) = &world.actor {
        instances.push(InstanceRaw::new(
            Mat4::from_scale_rotation_translation(
                Vec3::splat(ACTOR_RADIUS),
                actor.orientation,
                actor.position,
            ),
            colors::ACTOR,
            MeshKind::Sphere,
        ));
    }

    if instances.len() > MAX_INSTANCES {
        log::warn!(
            "Instance buffer overflow: {} > {}, truncating",
            instances.len(),
            MAX_INSTANCES
        );
        instances.truncate(MAX_INSTANCES);
    }

    let eye = world.camera.position;
    Frame {
        camera: CameraUniform {
            view_proj: world.camera.view_projection(aspect).to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        },
        instances,
    }
}

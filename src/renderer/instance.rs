//! GPU data structures for instanced box/sphere/coin drawing

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Mesh an instance is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MeshKind {
    Plane = 0,
    Cube = 1,
    Sphere = 2,
    Coin = 3,
}

/// One instance: model matrix columns plus color (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4], // offset 0
    pub color: [f32; 4],      // offset 64
    pub mesh: u32,            // offset 80
    pub _pad: [u32; 3],       // pad to 96 bytes
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: [f32; 4], mesh: MeshKind) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            mesh: mesh as u32,
            _pad: [0; 3],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// View-projection uniform
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// Colors for game elements
pub mod colors {
    pub const GROUND: [f32; 4] = [0.56, 0.93, 0.56, 1.0]; // Light green
    pub const ACTOR: [f32; 4] = [1.0, 0.65, 0.0, 1.0]; // Orange
    pub const OBSTACLE: [f32; 4] = [0.55, 0.27, 0.07, 1.0]; // Brown
    pub const WALL: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0]; // Gold
}

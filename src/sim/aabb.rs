//! Axis-aligned bounding boxes
//!
//! Every collision query in the game is box vs box. Volumes are built on
//! demand from a stored center and fixed half-extents, never cached.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its center and half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build from a center and full edge lengths
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full edge lengths
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Separating-axis test on x, y and z. Touching faces count as overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_min.x <= b_max.x
            && a_max.x >= b_min.x
            && a_min.y <= b_max.y
            && a_max.y >= b_min.y
            && a_min.z <= b_max.z
            && a_max.z >= b_min.z
    }

    /// Whether a point lies inside or on the box
    pub fn contains_point(&self, p: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        p.cmpge(min).all() && p.cmple(max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vec3::new(x, y, z), Vec3::splat(0.5))
    }

    #[test]
    fn test_overlap_on_all_axes() {
        assert!(unit_at(0.0, 0.5, 0.0).intersects(&unit_at(0.6, 0.5, 0.3)));
    }

    #[test]
    fn test_separated_on_single_axis() {
        // Overlaps on x and y, but not z
        assert!(!unit_at(0.0, 0.5, 0.0).intersects(&unit_at(0.5, 0.5, 2.0)));
        // Overlaps on x and z, but not y (jumped over)
        assert!(!unit_at(0.0, 2.0, 0.0).intersects(&unit_at(0.0, 0.5, 0.0)));
    }

    #[test]
    fn test_touching_faces_intersect() {
        assert!(unit_at(0.0, 0.5, 0.0).intersects(&unit_at(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_from_center_size() {
        let wall = Aabb::from_center_size(Vec3::new(0.0, 1.0, -20.5), Vec3::new(40.0, 2.0, 1.0));
        assert_eq!(wall.max().z, -20.0);
        assert_eq!(wall.min().x, -20.0);
        assert!(wall.contains_point(Vec3::new(19.0, 0.0, -20.2)));
    }
}

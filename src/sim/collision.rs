//! Collision resolution against static obstacles
//!
//! The response is deliberately blunt: any overlap rejects the whole
//! candidate motion for the tick. No sliding, no bounce. Containment in the
//! arena is a clamp, not a wall collision.

use glam::Vec3;

use super::aabb::Aabb;
use super::state::{Actor, ArenaBounds, Obstacle};

/// Outcome of testing a candidate position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Candidate overlaps this obstacle; motion must be discarded
    Blocked { obstacle_id: u32 },
    /// Candidate accepted, horizontally clamped into the arena
    Clear { position: Vec3 },
}

/// First obstacle (in id order) whose box overlaps `actor_box`
pub fn first_obstacle_hit(actor_box: &Aabb, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| actor_box.intersects(&o.bounds()))
        .map(|o| o.id)
}

/// Test the unclamped candidate against every obstacle, then clamp x/z.
///
/// The clamped position is tested as well: a fast airborne actor can
/// overshoot an obstacle sitting on the arena edge and be clamped back onto it.
pub fn resolve(candidate: Vec3, obstacles: &[Obstacle], bounds: &ArenaBounds) -> Resolution {
    if let Some(obstacle_id) = first_obstacle_hit(&Actor::bounds_at(candidate), obstacles) {
        return Resolution::Blocked { obstacle_id };
    }

    let position = bounds.clamp_horizontal(candidate);
    if position != candidate {
        if let Some(obstacle_id) = first_obstacle_hit(&Actor::bounds_at(position), obstacles) {
            return Resolution::Blocked { obstacle_id };
        }
    }
    Resolution::Clear { position }
}

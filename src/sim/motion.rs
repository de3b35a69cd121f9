//! Motion integration
//!
//! Per tick: input impulses, gravity, ground contact, then (after collision
//! acceptance) friction or air drag. Units are per tick, not per second.

use glam::{Quat, Vec3};

use super::state::Actor;
use super::tick::TickInput;
use crate::consts::*;
use crate::horizontal;

/// Tentative result of integrating one tick, before collision acceptance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: Vec3,
    /// (vx, vy - g, vz)
    pub velocity: Vec3,
    /// Candidate reached the ground this tick
    pub grounded: bool,
}

/// Apply directional impulses and the jump. Jump only fires when the actor
/// is grounded at the start of the tick. Returns true if a jump happened.
pub fn apply_input(actor: &mut Actor, input: &TickInput) -> bool {
    actor.velocity.x += f32::from(input.move_x.signum()) * MOVE_IMPULSE;
    actor.velocity.z += f32::from(input.move_z.signum()) * MOVE_IMPULSE;

    if input.jump && actor.grounded {
        actor.velocity.y = JUMP_IMPULSE;
        return true;
    }
    false
}

/// Gravity then explicit Euler step, with the candidate clamped to the ground
pub fn integrate(actor: &Actor, ground_height: f32) -> Candidate {
    let velocity = Vec3::new(
        actor.velocity.x,
        actor.velocity.y - GRAVITY,
        actor.velocity.z,
    );
    let mut position = actor.position + velocity;

    let grounded = position.y <= ground_height;
    if grounded {
        position.y = ground_height;
    }

    Candidate {
        position,
        velocity,
        grounded,
    }
}

/// Commit an accepted position and update velocity for the next tick
pub fn settle(actor: &mut Actor, candidate: &Candidate, committed: Vec3, ground_height: f32) {
    let previous = actor.position;
    let v = candidate.velocity;

    if committed.y <= ground_height {
        actor.position = Vec3::new(committed.x, ground_height, committed.z);
        actor.grounded = true;
        actor.velocity = Vec3::new(v.x * GROUND_FRICTION, 0.0, v.z * GROUND_FRICTION);
    } else {
        actor.position = committed;
        actor.grounded = false;
        actor.velocity = Vec3::new(v.x * AIR_DRAG, v.y, v.z * AIR_DRAG);
    }

    roll(actor, actor.position - previous);
}

/// Rotate the sphere as if it rolled along the horizontal displacement
fn roll(actor: &mut Actor, displacement: Vec3) {
    let travel = horizontal(displacement);
    let distance = travel.length();
    if distance < 1e-6 {
        return;
    }
    let axis = Vec3::Y.cross(travel / distance);
    let spin = Quat::from_axis_angle(axis, distance / ACTOR_RADIUS);
    actor.orientation = (spin * actor.orientation).normalize();
}

//! Procedural layout generation
//!
//! Rejection sampling on the integer grid inside the arena. Each placement
//! gets a bounded number of samples per spacing threshold; the threshold is
//! relaxed a few times, and as a last resort every grid cell is scanned for
//! the one farthest from everything already placed.
//!
//! Spacing may be relaxed but box clearance may not: coins and the spawn
//! point only ever land on cells whose box misses every obstacle box. When
//! obstacles leave no such cell, obstacles are dropped until one opens up.

use glam::Vec3;
use rand::Rng;

use super::aabb::Aabb;
use super::state::ArenaBounds;
use crate::consts::*;
use crate::planar_distance;

/// Positions for one round
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub obstacles: Vec<Vec3>,
    pub coins: Vec<Vec3>,
    pub spawn: Vec3,
}

/// Generate obstacles, then coins (clear of obstacles and each other), then
/// an actor spawn point clear of obstacles.
///
/// Coin count is always honored. Obstacle count may come back smaller when
/// the arena is too small to leave an open cell.
pub fn generate_layout<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &ArenaBounds,
    obstacle_count: usize,
    coin_count: usize,
) -> Layout {
    let mut obstacles = place_points(rng, bounds, obstacle_count, &[], |_| true);
    while !obstacles.is_empty() && open_cells(bounds, &obstacles, ACTOR_HALF_EXTENTS) == 0 {
        if let Some(dropped) = obstacles.pop() {
            log::warn!("Arena full, dropping obstacle at ({}, {})", dropped.x, dropped.z);
        }
    }

    let coins = place_points(rng, bounds, coin_count, &obstacles, |p| {
        !overlaps_obstacle(p, COIN_HALF_EXTENTS, &obstacles)
    });
    // At least one open cell is left above, so the origin is never used
    let spawn =
        find_spawn(rng, bounds, &obstacles).unwrap_or(Vec3::new(0.0, GROUND_HEIGHT, 0.0));
    Layout {
        obstacles,
        coins,
        spawn,
    }
}

/// Place up to `count` points on cells accepted by `allowed`, each at least
/// `MIN_SPACING` from every point in `avoid` and every point placed before
/// it. Stops early only when `allowed` rejects every cell.
pub fn place_points<R, A>(
    rng: &mut R,
    bounds: &ArenaBounds,
    count: usize,
    avoid: &[Vec3],
    allowed: A,
) -> Vec<Vec3>
where
    R: Rng + ?Sized,
    A: Fn(Vec3) -> bool,
{
    let mut placed: Vec<Vec3> = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = place_one(rng, bounds, &allowed, |p| {
            min_distance(p, avoid.iter().chain(placed.iter()))
        });
        match pos {
            Some(pos) => placed.push(pos),
            None => {
                log::warn!("No open cell left, placed {} of {}", placed.len(), count);
                break;
            }
        }
    }
    placed
}

/// Actor spawn point whose box misses every obstacle box (coins are not
/// considered). `None` when no such cell exists.
pub fn find_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &ArenaBounds,
    obstacles: &[Vec3],
) -> Option<Vec3> {
    place_one(
        rng,
        bounds,
        |p| !overlaps_obstacle(p, ACTOR_HALF_EXTENTS, obstacles),
        |p| min_distance(p, obstacles.iter()),
    )
}

/// Whether a box of `half_extents` centered at `p` touches any obstacle box
pub fn overlaps_obstacle(p: Vec3, half_extents: Vec3, obstacles: &[Vec3]) -> bool {
    let probe = Aabb::new(p, half_extents);
    obstacles
        .iter()
        .any(|o| probe.intersects(&Aabb::new(*o, OBSTACLE_HALF_EXTENTS)))
}

/// Sample until `allowed(p)` and `clearance(p) >= threshold`, relaxing the
/// threshold when the attempt budget runs out.
fn place_one<R, A, F>(rng: &mut R, bounds: &ArenaBounds, allowed: A, clearance: F) -> Option<Vec3>
where
    R: Rng + ?Sized,
    A: Fn(Vec3) -> bool,
    F: Fn(Vec3) -> f32,
{
    let mut threshold = MIN_SPACING;
    for relaxation in 0..=MAX_RELAXATIONS {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let p = sample_cell(rng, bounds);
            if allowed(p) && clearance(p) >= threshold {
                return Some(p);
            }
        }
        if relaxation < MAX_RELAXATIONS {
            threshold *= RELAX_FACTOR;
            log::warn!("Placement crowded, relaxing spacing to {:.2}", threshold);
        }
    }

    log::warn!("Placement exhausted, scanning grid for the most open cell");
    best_cell(bounds, &allowed, &clearance)
}

/// Random integer grid cell on the ground
fn sample_cell<R: Rng + ?Sized>(rng: &mut R, bounds: &ArenaBounds) -> Vec3 {
    let n = bounds.grid_extent();
    let x = rng.random_range(-n..=n);
    let z = rng.random_range(-n..=n);
    Vec3::new(x as f32, GROUND_HEIGHT, z as f32)
}

fn grid_cells(bounds: &ArenaBounds) -> impl Iterator<Item = Vec3> {
    let n = bounds.grid_extent();
    (-n..=n).flat_map(move |x| (-n..=n).map(move |z| Vec3::new(x as f32, GROUND_HEIGHT, z as f32)))
}

/// Allowed grid cell with the largest clearance (first one wins ties)
fn best_cell<A, F>(bounds: &ArenaBounds, allowed: &A, clearance: &F) -> Option<Vec3>
where
    A: Fn(Vec3) -> bool,
    F: Fn(Vec3) -> f32,
{
    let mut best = None;
    let mut best_clearance = f32::NEG_INFINITY;
    for p in grid_cells(bounds).filter(|p| allowed(*p)) {
        let c = clearance(p);
        if c > best_clearance {
            best = Some(p);
            best_clearance = c;
        }
    }
    best
}

/// Number of grid cells where a box of `half_extents` misses every obstacle
fn open_cells(bounds: &ArenaBounds, obstacles: &[Vec3], half_extents: Vec3) -> usize {
    grid_cells(bounds)
        .filter(|p| !overlaps_obstacle(*p, half_extents, obstacles))
        .count()
}

/// Smallest planar distance from `p` to any of `others` (infinite if none)
fn min_distance<'a>(p: Vec3, others: impl Iterator<Item = &'a Vec3>) -> f32 {
    others
        .map(|o| planar_distance(p, *o))
        .fold(f32::INFINITY, f32::min)
}

//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives here. Round ownership (score and
//! phase) sits with the session; the world only holds the spatial state.

use glam::{Quat, Vec3};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::camera::CameraRig;
use super::layout::generate_layout;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Countdown running, simulation live
    #[default]
    Running,
    /// Every coin collected
    Won,
    /// Countdown reached zero
    Lost,
}

impl GamePhase {
    /// Terminal phases freeze the simulation until a reset
    pub fn is_frozen(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Discrete notifications for presentation and session collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { coin_id: u32, position: Vec3 },
    /// Candidate motion rejected by an obstacle
    Blocked { obstacle_id: u32 },
    Jumped,
    Landed,
    RoundWon,
    RoundLost,
}

/// Score and phase of the current round, owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    pub phase: GamePhase,
}

/// The player-controlled sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    /// Rolling orientation (presentation only)
    pub orientation: Quat,
}

impl Actor {
    /// Fresh actor resting on the ground at the given spot
    pub fn spawn_at(position: Vec3, ground_height: f32) -> Self {
        Self {
            position: Vec3::new(position.x, ground_height, position.z),
            velocity: Vec3::ZERO,
            grounded: true,
            orientation: Quat::IDENTITY,
        }
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Aabb {
        Self::bounds_at(self.position)
    }

    /// Bounding box the actor would occupy at `position`
    pub fn bounds_at(position: Vec3) -> Aabb {
        Aabb::new(position, ACTOR_HALF_EXTENTS)
    }
}

/// A static box the actor cannot pass through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec3,
    pub half_extents: Vec3,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }
}

/// A collectible coin. Present in the world only while alive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub position: Vec3,
    pub half_extents: Vec3,
}

impl Coin {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }
}

/// Square play area [-B, B]² on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Half-width B
    pub half_extent: f32,
    /// Resting height of the actor center
    pub ground_height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl ArenaBounds {
    pub fn new(half_extent: f32) -> Self {
        Self {
            half_extent,
            ground_height: GROUND_HEIGHT,
        }
    }

    /// Clamp x and z independently into [-B, B]; y is left alone
    pub fn clamp_horizontal(&self, p: Vec3) -> Vec3 {
        let b = self.half_extent;
        Vec3::new(p.x.clamp(-b, b), p.y, p.z.clamp(-b, b))
    }

    pub fn contains_horizontal(&self, p: Vec3) -> bool {
        let b = self.half_extent;
        (-b..=b).contains(&p.x) && (-b..=b).contains(&p.z)
    }

    /// Integer grid extent used by layout sampling
    pub fn grid_extent(&self) -> i32 {
        self.half_extent.floor().max(0.0) as i32
    }

    /// The four boundary walls, centered at ±(B + 0.5). Their inner faces
    /// sit exactly on the clamp limits.
    pub fn wall_boxes(&self) -> [Aabb; 4] {
        let b = self.half_extent;
        let offset = b + WALL_THICKNESS / 2.0;
        let y = WALL_HEIGHT / 2.0;
        let along_x = Vec3::new(2.0 * b, WALL_HEIGHT, WALL_THICKNESS);
        let along_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 2.0 * b);
        [
            Aabb::from_center_size(Vec3::new(0.0, y, -offset), along_x),
            Aabb::from_center_size(Vec3::new(0.0, y, offset), along_x),
            Aabb::from_center_size(Vec3::new(-offset, y, 0.0), along_z),
            Aabb::from_center_size(Vec3::new(offset, y, 0.0), along_z),
        ]
    }
}

/// RNG state wrapper for serialization. Each reset draws a new stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next layout
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete spatial state of the simulation (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bounds: ArenaBounds,
    /// None until the first reset
    pub actor: Option<Actor>,
    /// Static obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Alive coins (sorted by id)
    pub coins: Vec<Coin>,
    pub camera: CameraRig,
    /// Events produced by the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Create an empty world. No actor exists until `reset` is called.
    pub fn new(seed: u64, bounds: ArenaBounds) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            bounds,
            actor: None,
            obstacles: Vec::new(),
            coins: Vec::new(),
            camera: CameraRig::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_obstacle(&mut self, position: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            position,
            half_extents: OBSTACLE_HALF_EXTENTS,
        });
        id
    }

    pub fn add_coin(&mut self, position: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            position,
            half_extents: COIN_HALF_EXTENTS,
        });
        id
    }

    /// Place the actor at rest and snap the camera behind it
    pub fn spawn_actor(&mut self, position: Vec3) {
        let actor = Actor::spawn_at(position, self.bounds.ground_height);
        self.camera.snap_to(actor.position);
        self.actor = Some(actor);
    }

    /// Regenerate obstacles, coins and spawn point, and reset the actor
    pub fn reset(&mut self, obstacle_count: usize, coin_count: usize) {
        let mut rng = self.rng_state.next_rng();
        let layout = generate_layout(&mut rng, &self.bounds, obstacle_count, coin_count);

        self.obstacles.clear();
        self.coins.clear();
        self.events.clear();
        for pos in layout.obstacles {
            self.add_obstacle(pos);
        }
        for pos in layout.coins {
            self.add_coin(pos);
        }
        self.spawn_actor(layout.spawn);

        log::info!(
            "World reset: {} obstacles, {} coins, spawn ({}, {})",
            self.obstacles.len(),
            self.coins.len(),
            layout.spawn.x,
            layout.spawn.z
        );
    }

    pub fn coins_remaining(&self) -> usize {
        self.coins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_starts_without_actor() {
        let world = World::new(1, ArenaBounds::default());
        assert!(world.actor.is_none());
        assert!(world.coins.is_empty());
    }

    #[test]
    fn test_reset_populates_world() {
        let mut world = World::new(42, ArenaBounds::new(15.0));
        world.reset(6, 5);

        assert_eq!(world.obstacles.len(), 6);
        assert_eq!(world.coins.len(), 5);
        let actor = world.actor.expect("actor spawned");
        assert!(actor.grounded);
        assert_eq!(actor.velocity, Vec3::ZERO);
        assert_eq!(actor.position.y, GROUND_HEIGHT);
        // Spawn never overlaps an obstacle
        assert!(world.obstacles.iter().all(|o| !o.bounds().intersects(&actor.bounds())));
    }

    #[test]
    fn test_spawn_rests_on_arena_ground() {
        let mut bounds = ArenaBounds::new(10.0);
        bounds.ground_height = 1.5;
        let mut world = World::new(3, bounds);
        world.spawn_actor(Vec3::new(2.0, 9.0, -1.0));
        let actor = world.actor.expect("actor spawned");
        assert_eq!(actor.position, Vec3::new(2.0, 1.5, -1.0));
        assert!(actor.grounded);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(7, ArenaBounds::default());
        world.reset(4, 4);
        world.reset(4, 4);
        let mut ids: Vec<u32> = world
            .obstacles
            .iter()
            .map(|o| o.id)
            .chain(world.coins.iter().map(|c| c.id))
            .collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_resets_draw_different_layouts() {
        let mut world = World::new(7, ArenaBounds::default());
        world.reset(8, 8);
        let first: Vec<Vec3> = world.coins.iter().map(|c| c.position).collect();
        world.reset(8, 8);
        let second: Vec<Vec3> = world.coins.iter().map(|c| c.position).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = World::new(99, ArenaBounds::default());
        let mut b = World::new(99, ArenaBounds::default());
        a.reset(5, 5);
        b.reset(5, 5);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.actor, b.actor);
    }

    #[test]
    fn test_wall_inner_faces_match_clamp() {
        let bounds = ArenaBounds::new(20.0);
        let [north, south, west, east] = bounds.wall_boxes();
        assert_eq!(north.max().z, -20.0);
        assert_eq!(south.min().z, 20.0);
        assert_eq!(west.max().x, -20.0);
        assert_eq!(east.min().x, 20.0);
        assert_eq!(north.center.z, -20.5);
    }

    #[test]
    fn test_clamp_horizontal_leaves_height() {
        let bounds = ArenaBounds::new(10.0);
        let p = bounds.clamp_horizontal(Vec3::new(12.0, 3.0, -11.0));
        assert_eq!(p, Vec3::new(10.0, 3.0, -10.0));
        assert!(bounds.contains_horizontal(p));
    }
}

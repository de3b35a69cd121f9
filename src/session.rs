//! Round flow around the simulation
//!
//! Owns the score, the countdown and the level. The simulation only reads the
//! phase; the session decides when a round is won or lost.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::settings::Settings;
use crate::sim::{ArenaBounds, GameEvent, GamePhase, RoundState, TickInput, World, tick};

#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub world: World,
    pub round: RoundState,
    level: u32,
    ticks_remaining: u32,
}

impl Session {
    /// Start a session at level 1 from the settings seed, or a clock seed
    /// when none is configured
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Seed: {}", seed);
        Self::with_seed(settings, seed)
    }

    /// Start a session at level 1 with an explicit seed. Settings are
    /// validated first.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        let settings = settings.validated();
        let world = World::new(seed, ArenaBounds::new(settings.arena_boundary));
        let mut session = Self {
            ticks_remaining: settings.round_ticks(),
            settings,
            world,
            round: RoundState::default(),
            level: 1,
        };
        session.start_level(1);
        session
    }

    pub fn seed(&self) -> u64 {
        self.world.seed
    }

    /// Regenerate the world for `level` and restart the countdown. Score is kept.
    pub fn start_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.world.reset(
            self.settings.obstacles_for_level(self.level),
            self.settings.coins_for_level(self.level),
        );
        self.ticks_remaining = self.settings.round_ticks();
        self.round.phase = GamePhase::Running;
        log::info!(
            "Level {} started: {} coins, {}s on the clock",
            self.level,
            self.world.coins_remaining(),
            self.settings.round_seconds
        );
    }

    /// Advance to the next level after a win
    pub fn next_level(&mut self) {
        self.start_level(self.level + 1);
    }

    /// New run from level 1 with a zero score
    pub fn restart(&mut self) {
        self.round.score = 0;
        self.start_level(1);
    }

    /// Run one frame. Returns the events produced by it.
    pub fn update(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.world, input, &mut self.round);
        if self.round.phase.is_frozen() {
            return &self.world.events;
        }

        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);

        // Coins first: clearing the arena on the final tick still wins
        if self.world.coins_remaining() == 0 {
            self.round.phase = GamePhase::Won;
            self.world.events.push(GameEvent::RoundWon);
            log::info!("Level {} cleared with score {}", self.level, self.round.score);
        } else if self.ticks_remaining == 0 {
            self.round.phase = GamePhase::Lost;
            self.world.events.push(GameEvent::RoundLost);
            log::info!(
                "Time up on level {} with {} coins left",
                self.level,
                self.world.coins_remaining()
            );
        }

        &self.world.events
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.round.score
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// Countdown display value, rounded up
    pub fn seconds_remaining(&self) -> u32 {
        self.ticks_remaining.div_ceil(self.settings.ticks_per_second)
    }

    pub fn coins_remaining(&self) -> usize {
        self.world.coins_remaining()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever the caller points). Missing
//! fields fall back to defaults, so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BOUNDARY;
use crate::persistence::{self, PersistError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout seed (None = pick one at startup)
    pub seed: Option<u64>,

    // === Arena ===
    /// Arena half-width B
    pub arena_boundary: f32,

    // === Level scaling ===
    pub base_obstacles: usize,
    pub obstacles_per_level: usize,
    pub max_obstacles: usize,
    pub base_coins: usize,
    pub coins_per_level: usize,
    pub max_coins: usize,

    // === Timing ===
    /// Countdown length per round
    pub round_seconds: u32,
    /// Frames (ticks) per second the countdown assumes
    pub ticks_per_second: u32,

    // === Audio ===
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            arena_boundary: DEFAULT_BOUNDARY,

            base_obstacles: 4,
            obstacles_per_level: 2,
            max_obstacles: 60,
            base_coins: 5,
            coins_per_level: 1,
            max_coins: 30,

            round_seconds: 60,
            ticks_per_second: 60,

            music_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Copy with nonsensical values pulled back into range
    pub fn validated(&self) -> Self {
        let mut s = self.clone();
        if !s.arena_boundary.is_finite() || s.arena_boundary < 2.0 {
            log::warn!("arena_boundary {} too small, using 2", s.arena_boundary);
            s.arena_boundary = 2.0;
        }
        s.ticks_per_second = s.ticks_per_second.max(1);
        s.round_seconds = s.round_seconds.max(1);
        s.max_obstacles = s.max_obstacles.max(s.base_obstacles);
        s.max_coins = s.max_coins.max(s.base_coins).max(1);
        s.base_coins = s.base_coins.max(1);
        s.master_volume = s.master_volume.clamp(0.0, 1.0);
        s.sfx_volume = s.sfx_volume.clamp(0.0, 1.0);
        s
    }

    /// Countdown length in ticks
    pub fn round_ticks(&self) -> u32 {
        self.round_seconds.saturating_mul(self.ticks_per_second)
    }

    /// Obstacle count for a 1-based level
    pub fn obstacles_for_level(&self, level: u32) -> usize {
        let extra = self
            .obstacles_per_level
            .saturating_mul(level.saturating_sub(1) as usize);
        self.base_obstacles.saturating_add(extra).min(self.max_obstacles)
    }

    /// Coin count for a 1-based level
    pub fn coins_for_level(&self, level: u32) -> usize {
        let extra = self
            .coins_per_level
            .saturating_mul(level.saturating_sub(1) as usize);
        self.base_coins.saturating_add(extra).min(self.max_coins)
    }

    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let settings: Self = persistence::load_json(path)?;
        Ok(settings.validated())
    }

    /// Load settings, or defaults if the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

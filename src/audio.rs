//! Sound cues driven by game events
//!
//! The simulation never plays sounds itself. It emits events; the audio
//! manager subscribes to them and hands cues to a backend. Backend failures
//! (autoplay policies, missing devices) are logged and otherwise ignored.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin picked up
    CoinCollect,
    /// Jump off the ground
    Jump,
    /// Bumped into an obstacle
    Bump,
    /// All coins collected
    RoundWon,
    /// Countdown ran out
    RoundLost,
}

impl SoundEffect {
    /// Cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinCollect),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Blocked { .. } => Some(SoundEffect::Bump),
            GameEvent::RoundWon => Some(SoundEffect::RoundWon),
            GameEvent::RoundLost => Some(SoundEffect::RoundLost),
            GameEvent::Landed => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Playback refused until a user gesture (browser autoplay policy)
    #[error("playback not allowed")]
    NotAllowed,
    /// No output device or context
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    fn set_music(&mut self, playing: bool, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs what it would play (headless/native runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("♪ {:?} (vol {:.2})", effect, volume);
        Ok(())
    }

    fn set_music(&mut self, playing: bool, volume: f32) -> Result<(), AudioError> {
        log::debug!("♪ music {} (vol {:.2})", if playing { "on" } else { "off" }, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_on: bool,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_on: settings.music_enabled,
            muted: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    /// Flip background music on/off; returns the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_on = !self.music_on;
        let volume = if self.muted { 0.0 } else { self.master_volume };
        if let Err(e) = self.backend.set_music(self.music_on, volume) {
            log::warn!("Music toggle failed: {}", e);
        }
        self.music_on
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; failures are logged, never propagated
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect, vol) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    /// Play the cues for one frame's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

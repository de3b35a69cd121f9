//! Coin Arena entry point
//!
//! Native headless runner: plays rounds with the autopilot, routes events to
//! a logging audio backend and records the final score.
//!
//! Usage: `coin-arena [settings.json] [--seed N] [--levels N]`
//! (set `RUST_LOG=debug` for per-frame detail)

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use coin_arena::audio::{AudioManager, LogBackend};
use coin_arena::renderer::{FrameSnapshot, build_frame};
use coin_arena::sim::{GamePhase, TickInput};
use coin_arena::{HighScores, Session, Settings};

const HIGHSCORES_FILE: &str = "coin_arena_highscores.json";
/// Frames between debug snapshots
const SNAPSHOT_INTERVAL: u64 = 120;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Parser)]
#[command(name = "coin-arena")]
#[command(about = "Headless Coin Arena run played by the autopilot")]
struct Args {
    /// Settings file (defaults are used if it is missing)
    #[arg(default_value = "coin_arena_settings.json")]
    settings: PathBuf,

    /// Layout seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Levels to play before stopping
    #[arg(long, default_value_t = 5)]
    levels: u32,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Coin Arena (native) starting...");

    let mut settings = Settings::load_or_default(&args.settings);
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut session = Session::new(settings);
    let mut audio = AudioManager::new(LogBackend, &session.settings);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    loop {
        let events = session.update(&idle);
        audio.handle_events(events);

        let world = &session.world;
        if world.time_ticks % SNAPSHOT_INTERVAL == 0 && log::log_enabled!(log::Level::Debug) {
            match FrameSnapshot::capture(world).to_json() {
                Ok(json) => log::debug!("frame {}", json),
                Err(e) => log::warn!("Snapshot failed: {}", e),
            }
            let frame = build_frame(world, 16.0 / 9.0);
            log::debug!(
                "{} instances ({} bytes)",
                frame.instances.len(),
                frame.instance_bytes().len()
            );
        }

        match session.phase() {
            GamePhase::Running => {}
            GamePhase::Won if session.level() < args.levels => {
                log::info!(
                    "Level {} won with {}s to spare",
                    session.level(),
                    session.seconds_remaining()
                );
                session.next_level();
            }
            GamePhase::Won | GamePhase::Lost => break,
        }
    }

    log::info!(
        "Run over: score {} on level {} ({:?})",
        session.score(),
        session.level(),
        session.phase()
    );

    let highscores_path = PathBuf::from(HIGHSCORES_FILE);
    let mut high_scores = HighScores::load(&highscores_path);
    match high_scores.add_score(session.score(), session.level(), now_millis()) {
        Some(rank) => {
            log::info!("New high score! Rank #{}", rank);
            if let Err(e) = high_scores.save(&highscores_path) {
                log::warn!("Could not save high scores: {}", e);
            }
        }
        None => log::info!("Best so far: {:?}", high_scores.top_score()),
    }
}

//! Coin Catcher headless runner
//!
//! Plays a demo session with autoplay at a fixed 60 Hz frame rate and logs
//! what happens. Usage: `coin-catcher [config.json] [max_frames]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use coin_catcher::SimConfig;
use coin_catcher::audio::{AudioManager, LogSink};
use coin_catcher::consts::FRAME_MS;
use coin_catcher::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Two minutes of play at 60 Hz
const DEFAULT_MAX_FRAMES: u64 = 60 * 120;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Coin Catcher (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> coin_catcher::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut state = GameState::new(config, seed)?;
    let mut audio = AudioManager::new(Box::new(LogSink));
    log::info!("Started new game with seed: {}", seed);

    state.start();
    audio.start_music();

    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut frame = 0;
    while frame < max_frames && state.phase == GamePhase::Playing {
        tick(&mut state, &input, FRAME_MS)?;
        frame += 1;

        audio.play_all(state.drain_sound_cues());
        for event in state.drain_events() {
            match event {
                GameEvent::CoinCaught { id, score } => log::info!("{} caught, score {}", id, score),
                GameEvent::CoinMissed { id, lives } => log::info!("{} missed, lives {}", id, lives),
                GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
            }
        }
    }

    audio.release();
    println!(
        "frames={} score={} lives={} speed={:.4}",
        frame, state.score, state.lives, state.speed.value
    );
    Ok(())
}

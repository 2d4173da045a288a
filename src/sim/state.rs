//! Game state and session context
//!
//! Everything a tick reads or writes lives here: the entity store, score,
//! lives, the speed ramp, the RNG and the queues the host drains afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entities, EntityId};
use super::placement::{self, SpawnRegion};
use crate::audio::SoundCue;
use crate::error::Result;
use crate::settings::SimConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing moves
    Ready,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Coin overlapped the catcher and was relocated
    CoinCaught { id: EntityId, score: u32 },
    /// Coin fell past the bottom and was respawned
    CoinMissed { id: EntityId, lives: u32 },
    /// Lives reached zero
    GameOver { score: u32 },
}

/// Fall speed multiplier, ramped every movement pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    pub value: f32,
    /// Set once the first movement pass has run since creation/reset
    pub primed: bool,
}

impl SpeedRamp {
    pub fn new(base: f32) -> Self {
        Self {
            value: base,
            primed: false,
        }
    }

    /// Mark the ramp for re-initialisation on the next movement pass
    pub fn reset(&mut self, base: f32) {
        self.value = base;
        self.primed = false;
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub entities: Entities,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub speed: SpeedRamp,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    sound_cues: Vec<SoundCue>,
}

impl GameState {
    /// Create a session in the `Ready` phase with a fresh layout
    pub fn new(config: SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut state = Self {
            config,
            entities: Entities::new(),
            phase: GamePhase::Ready,
            score: 0,
            lives: config.starting_lives,
            speed: SpeedRamp::new(config.speed_modifier_base),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            sound_cues: Vec::new(),
        };
        state.entities = state.generate_entities()?;
        Ok(state)
    }

    /// Build the catcher plus a non-overlapping coin layout above the screen
    pub fn generate_entities(&mut self) -> Result<Entities> {
        let config = self.config;
        let mut entities = Entities::new();
        entities.insert_catcher(config.catcher_start(), config.catcher_size())?;

        let region = SpawnRegion::new(config.coin_max_x(), config.initial_spawn_depth);
        let positions = placement::initial_layout(
            &mut self.rng,
            region,
            config.coin_count,
            config.min_separation,
            config.max_placement_attempts,
        );
        for (n, pos) in positions.into_iter().enumerate() {
            entities.insert_coin(n as u32, pos, config.coin_size());
        }
        Ok(entities)
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            self.score = 0;
            self.lives = self.config.starting_lives;
            self.phase = GamePhase::Playing;
            log::info!("Game started with {} coins", self.config.coin_count);
        }
    }

    /// Back to a fresh session: score, lives, speed and layout all reset
    pub fn restart(&mut self) -> Result<()> {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.speed.reset(self.config.speed_modifier_base);
        self.time_ticks = 0;
        self.entities = self.generate_entities()?;
        self.events.clear();
        self.sound_cues.clear();
        self.phase = GamePhase::Playing;
        log::info!("Game restarted");
        Ok(())
    }

    /// Respawn point for `id`, kept apart from every other coin
    pub fn respawn_position(&mut self, id: EntityId) -> Vec2 {
        let config = self.config;
        let region = SpawnRegion::new(config.coin_max_x(), config.respawn_depth);
        let neighbours = self.entities.coin_positions_except(id);
        placement::place(
            &mut self.rng,
            region,
            &neighbours,
            config.min_separation,
            config.max_placement_attempts,
        )
        .pos
    }

    /// Score one catch
    pub fn award_point(&mut self, id: EntityId) {
        self.score += 1;
        self.sound_cues.push(SoundCue::Collect);
        self.events.push(GameEvent::CoinCaught {
            id,
            score: self.score,
        });
    }

    /// Lose one life, floored at zero
    pub fn lose_life(&mut self, id: EntityId) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::CoinMissed {
            id,
            lives: self.lives,
        });
    }

    /// Enter `GameOver` once lives are gone
    pub fn check_game_over(&mut self) {
        if self.phase == GamePhase::Playing && self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.sound_cues.push(SoundCue::GameOver);
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over, final score {}", self.score);
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take every sound cue queued since the last drain
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }
}

//! Per-frame simulation tick
//!
//! Runs movement, collision and drag in that order against one `GameState`.
//! Each system sees what the previous one changed.

use super::collision::CollisionSystem;
use super::drag::{DragSystem, TouchEvent};
use super::movement::MovementSystem;
use super::state::{GamePhase, GameState};
use crate::error::Result;
use crate::settings::SimConfig;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch/pointer events since the last tick
    pub touches: Vec<TouchEvent>,
    /// Restart the session before simulating
    pub reset: bool,
    /// Idle/demo mode - the catcher chases the lowest coin
    pub autoplay: bool,
}

/// The three per-tick systems, built from one config
#[derive(Debug, Clone, Copy)]
pub struct Systems {
    pub movement: MovementSystem,
    pub collision: CollisionSystem,
    pub drag: DragSystem,
}

impl Systems {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            movement: MovementSystem::new(config),
            collision: CollisionSystem::new(),
            drag: DragSystem::new(config),
        }
    }

    /// Movement, then collision, then drag
    pub fn run(
        &self,
        state: &mut GameState,
        touches: &[TouchEvent],
        delta_ms: f32,
        reset: bool,
    ) -> Result<()> {
        self.movement.run(state, delta_ms, reset)?;
        self.collision.run(state)?;
        self.drag.run(state, touches)?;
        Ok(())
    }
}

/// Advance the game by one host frame of `delta_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) -> Result<()> {
    if input.reset {
        state.restart()?;
    }

    if state.phase != GamePhase::Playing {
        return Ok(());
    }

    state.time_ticks += 1;

    let autoplay_touches;
    let touches = if input.autoplay {
        autoplay_touches = autoplay(state)?;
        &autoplay_touches[..]
    } else {
        &input.touches[..]
    };

    let systems = Systems::new(&state.config);
    systems.run(state, touches, delta_ms, input.reset)?;

    state.check_game_over();
    Ok(())
}

/// Touches that drag the catcher under the lowest coin
fn autoplay(state: &GameState) -> Result<Vec<TouchEvent>> {
    let catcher = state.entities.catcher()?;

    let target = state
        .entities
        .coins()
        .map(|(_, coin)| coin)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|coin| coin.pos.x + coin.size.x / 2.0);

    let Some(x) = target else {
        return Ok(Vec::new());
    };

    let mut touches = Vec::with_capacity(2);
    if !catcher.is_dragging() {
        touches.push(TouchEvent::start(x));
    }
    touches.push(TouchEvent::moved(x));
    Ok(touches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundCue;
    use crate::consts::FRAME_MS;
    use crate::sim::entity::EntityId;
    use crate::sim::placement::separation;
    use crate::sim::state::GameEvent;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(SimConfig::default(), seed).unwrap();
        state.start();
        state
    }

    /// Catcher parked at the far left so nothing gets caught by accident
    fn park_catcher(state: &mut GameState) {
        state.entities.catcher_mut().unwrap().pos.x = -1000.0;
    }

    #[test]
    fn test_ready_phase_does_not_tick() {
        let mut state = GameState::new(SimConfig::default(), 1).unwrap();
        let before = state.entities.clone();
        tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();
        assert_eq!(state.entities, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_drag_sees_collision_results() {
        let mut state = playing(2);
        let id = EntityId::Coin(0);
        let catcher = state.entities.catcher().unwrap().bounds();
        state.entities.get_mut(id).unwrap().pos = catcher.pos + Vec2::splat(10.0);

        let input = TickInput {
            touches: vec![TouchEvent::start(50.0), TouchEvent::moved(50.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS).unwrap();

        assert_eq!(state.score, 1);
        assert_eq!(state.entities.catcher().unwrap().pos.x, 0.0);
        assert!(state.entities.get(id).unwrap().pos.y <= 0.0);
        assert_eq!(state.drain_sound_cues(), vec![SoundCue::Collect]);
    }

    #[test]
    fn test_game_over_after_last_life() {
        let mut state = playing(3);
        park_catcher(&mut state);
        state.lives = 1;
        state.entities.get_mut(EntityId::Coin(1)).unwrap().pos.y = 10_000.0;

        tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));

        // Frozen until restarted
        let frozen = state.entities.clone();
        tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();
        assert_eq!(state.entities, frozen);
    }

    #[test]
    fn test_reset_input_restarts_session() {
        let mut state = playing(4);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();
        }
        assert!(state.speed.value > 0.1);
        state.score = 7;

        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &reset, FRAME_MS).unwrap();
        assert_eq!(state.speed.value, 0.1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_missing_catcher_surfaces_error() {
        let mut state = playing(5);
        state.entities.remove(EntityId::Catcher);
        assert!(tick(&mut state, &TickInput::default(), FRAME_MS).is_err());
    }

    #[test]
    fn test_autoplay_follows_lowest_coin() {
        let mut state = playing(6);
        state.entities.get_mut(EntityId::Coin(2)).unwrap().pos = Vec2::new(300.0, 100.0);
        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS).unwrap();
        let catcher = state.entities.catcher().unwrap();
        assert!(catcher.is_dragging());
        assert_eq!(catcher.pos.x, 300.0 + 17.5 - 50.0);
    }

    #[test]
    fn test_end_to_end_single_miss() {
        let mut state = playing(2024);
        park_catcher(&mut state);
        assert_eq!(state.entities.len(), 7);

        // Stagger coins 100px apart so exactly one leaves the screen first
        for (n, id) in state.entities.coin_ids().into_iter().enumerate() {
            state.entities.get_mut(id).unwrap().pos =
                Vec2::new(n as f32 * 60.0, -10.0 - n as f32 * 100.0);
        }
        let lowest = EntityId::Coin(0);

        let mut ticks = 0;
        while state.lives == 3 {
            tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();
            ticks += 1;
            assert!(ticks < 100_000, "coin never left the screen");
        }

        assert_eq!(state.lives, 2);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::CoinMissed {
                id: lowest,
                lives: 2
            }]
        );

        let config = state.config;
        let respawned = state.entities.get(lowest).unwrap().pos;
        assert!(respawned.y <= 0.0 && respawned.y > -config.respawn_depth);
        assert!(respawned.x >= 0.0 && respawned.x <= config.coin_max_x());
        for (id, coin) in state.entities.coins() {
            assert!(coin.pos.y <= config.screen_height);
            if id != lowest {
                assert!(separation(respawned, coin.pos) >= config.min_separation);
            }
        }
    }
}

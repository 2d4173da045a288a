//! Coin fall and off-screen respawn
//!
//! Each pass ramps the speed modifier, advances every coin and recycles any
//! coin that dropped below the screen, costing a life.

use super::state::GameState;
use crate::error::Result;
use crate::settings::SimConfig;

/// Advances coins each tick
#[derive(Debug, Clone, Copy)]
pub struct MovementSystem {
    screen_height: f32,
    base_velocity: f32,
    speed_base: f32,
    speed_step: f32,
    speed_cap: Option<f32>,
}

impl MovementSystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            screen_height: config.screen_height,
            base_velocity: config.base_velocity,
            speed_base: config.speed_modifier_base,
            speed_step: config.speed_modifier_step,
            speed_cap: config.max_speed_modifier,
        }
    }

    /// Run one movement pass. `delta_ms` is the elapsed frame time in
    /// milliseconds; `reset` re-initialises the speed ramp.
    pub fn run(&self, state: &mut GameState, delta_ms: f32, reset: bool) -> Result<()> {
        state.entities.catcher()?;

        self.ramp_speed(state, reset);
        let velocity = self.base_velocity * state.speed.value;
        let delta_ms = delta_ms.max(0.0);

        for id in state.entities.coin_ids() {
            let fell_off = match state.entities.get_mut(id) {
                Some(coin) => {
                    coin.pos.y += velocity * delta_ms;
                    coin.pos.y > self.screen_height
                }
                None => continue,
            };

            if fell_off {
                let pos = state.respawn_position(id);
                if let Some(coin) = state.entities.get_mut(id) {
                    coin.pos = pos;
                }
                state.lose_life(id);
                log::debug!(
                    "{} missed, respawned at ({:.1}, {:.1}), lives {}",
                    id,
                    pos.x,
                    pos.y,
                    state.lives
                );
            }
        }
        Ok(())
    }

    fn ramp_speed(&self, state: &mut GameState, reset: bool) {
        if reset || !state.speed.primed {
            state.speed.value = self.speed_base;
            state.speed.primed = true;
            return;
        }
        let next = state.speed.value + self.speed_step;
        state.speed.value = match self.speed_cap {
            Some(cap) => next.min(cap),
            None => next,
        };
    }
}

//! Catcher/coin collision detection
//!
//! Plain axis-aligned box overlap. A caught coin scores, queues the collect
//! sound and is relocated above the screen.

use super::entity::Rect;
use super::state::GameState;
use crate::error::Result;

/// Strict overlap test: boxes that only share an edge do not collide
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Detects catches each tick
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn new() -> Self {
        Self
    }

    /// Run one collision pass. Only positions of caught coins change.
    pub fn run(&self, state: &mut GameState) -> Result<()> {
        let catcher = state.entities.catcher()?.bounds();

        for id in state.entities.coin_ids() {
            let caught = state
                .entities
                .get(id)
                .is_some_and(|coin| aabb_overlap(&coin.bounds(), &catcher));
            if !caught {
                continue;
            }

            state.award_point(id);
            let pos = state.respawn_position(id);
            if let Some(coin) = state.entities.get_mut(id) {
                coin.pos = pos;
            }
            log::debug!("{} caught, score {}", id, state.score);
        }
        Ok(())
    }
}

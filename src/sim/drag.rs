//! Touch/pointer drag handling for the catcher

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::error::Result;
use crate::settings::SimConfig;

/// Gesture phase of a touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// A touch/pointer event delivered for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Horizontal page coordinate of the pointer
    pub page_x: f32,
}

impl TouchEvent {
    pub fn start(page_x: f32) -> Self {
        Self {
            phase: TouchPhase::Start,
            page_x,
        }
    }

    pub fn moved(page_x: f32) -> Self {
        Self {
            phase: TouchPhase::Move,
            page_x,
        }
    }

    pub fn end(page_x: f32) -> Self {
        Self {
            phase: TouchPhase::End,
            page_x,
        }
    }
}

/// Moves the catcher under the pointer while a drag is active
#[derive(Debug, Clone, Copy)]
pub struct DragSystem {
    screen_width: f32,
    clamp_to_screen: bool,
}

impl DragSystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            screen_width: config.screen_width,
            clamp_to_screen: config.clamp_catcher_to_screen,
        }
    }

    /// Apply this tick's touches. Only the first event of each phase counts,
    /// evaluated start, then move, then end.
    pub fn run(&self, state: &mut GameState, touches: &[TouchEvent]) -> Result<()> {
        let catcher = state.entities.catcher_mut()?;

        let first = |phase: TouchPhase| touches.iter().find(|t| t.phase == phase);

        if first(TouchPhase::Start).is_some() {
            catcher.set_dragging(true);
        }

        if let Some(touch) = first(TouchPhase::Move) {
            if catcher.is_dragging() {
                let mut x = touch.page_x - catcher.size.x / 2.0;
                if self.clamp_to_screen {
                    x = x.clamp(0.0, (self.screen_width - catcher.size.x).max(0.0));
                }
                catcher.pos.x = x;
            }
        }

        if first(TouchPhase::End).is_some() && catcher.is_dragging() {
            catcher.set_dragging(false);
        }
        Ok(())
    }
}

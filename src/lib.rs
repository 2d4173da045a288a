//! Coin Catcher - drag a catcher to collect falling coins
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, placement, movement, collision, drag)
//! - `settings`: Data-driven simulation configuration
//! - `audio`: Sound cue playback boundary
//! - `error`: Error types

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::SimConfig;

/// Game configuration defaults
pub mod consts {
    /// Host frame interval in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Screen dimensions (portrait phone)
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;

    /// Coin defaults
    pub const COIN_COUNT: u32 = 6;
    pub const COIN_WIDTH: f32 = 35.0;
    pub const COIN_HEIGHT: f32 = 35.0;

    /// Catcher defaults
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const CATCHER_HEIGHT: f32 = 120.0;
    /// Gap between the catcher's bottom edge and the screen bottom
    pub const CATCHER_BOTTOM_MARGIN: f32 = 20.0;

    pub const STARTING_LIVES: u32 = 3;

    /// Minimum spacing between spawned coins (Chebyshev distance)
    pub const MIN_SEPARATION: f32 = 70.0;
    /// Initial layout spreads coins up to this far above the screen
    pub const INITIAL_SPAWN_DEPTH: f32 = 500.0;
    /// Respawned coins land up to this far above the screen
    pub const RESPAWN_DEPTH: f32 = 100.0;
    /// Rejection sampling attempts before accepting the best candidate
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

    /// Fall velocity in px/ms before the speed modifier is applied
    pub const BASE_VELOCITY: f32 = 0.1;
    /// Speed modifier after start/reset
    pub const SPEED_MODIFIER_BASE: f32 = 0.1;
    /// Speed modifier growth per tick
    pub const SPEED_MODIFIER_STEP: f32 = 0.0005;
}

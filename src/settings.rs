//! Simulation configuration
//!
//! Everything the systems need to know about the screen, entity sizes and
//! difficulty tuning. Loaded from JSON so hosts and tests can override any field.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Tunable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Coins ===
    pub coin_count: u32,
    pub coin_width: f32,
    pub coin_height: f32,

    // === Catcher ===
    pub catcher_width: f32,
    pub catcher_height: f32,
    /// Gap between catcher bottom and screen bottom
    pub catcher_bottom_margin: f32,
    /// Keep the catcher fully on screen while dragging
    pub clamp_catcher_to_screen: bool,

    // === Session ===
    pub starting_lives: u32,

    // === Placement ===
    /// Minimum Chebyshev distance between spawned coins
    pub min_separation: f32,
    /// Depth above the screen used for the initial layout
    pub initial_spawn_depth: f32,
    /// Depth above the screen used when a coin respawns
    pub respawn_depth: f32,
    pub max_placement_attempts: u32,

    // === Difficulty ===
    /// Fall velocity in px/ms, scaled by the speed modifier
    pub base_velocity: f32,
    pub speed_modifier_base: f32,
    pub speed_modifier_step: f32,
    /// Upper bound for the speed modifier (unbounded when `None`)
    pub max_speed_modifier: Option<f32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            coin_count: COIN_COUNT,
            coin_width: COIN_WIDTH,
            coin_height: COIN_HEIGHT,

            catcher_width: CATCHER_WIDTH,
            catcher_height: CATCHER_HEIGHT,
            catcher_bottom_margin: CATCHER_BOTTOM_MARGIN,
            clamp_catcher_to_screen: false,

            starting_lives: STARTING_LIVES,

            min_separation: MIN_SEPARATION,
            initial_spawn_depth: INITIAL_SPAWN_DEPTH,
            respawn_depth: RESPAWN_DEPTH,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            base_velocity: BASE_VELOCITY,
            speed_modifier_base: SPEED_MODIFIER_BASE,
            speed_modifier_step: SPEED_MODIFIER_STEP,
            max_speed_modifier: None,
        }
    }
}

impl SimConfig {
    /// Config for a specific screen size, everything else default
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the systems cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("coin_width", self.coin_width),
            ("coin_height", self.coin_height),
            ("catcher_width", self.catcher_width),
            ("catcher_height", self.catcher_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{field} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("catcher_bottom_margin", self.catcher_bottom_margin),
            ("min_separation", self.min_separation),
            ("initial_spawn_depth", self.initial_spawn_depth),
            ("respawn_depth", self.respawn_depth),
            ("base_velocity", self.base_velocity),
            ("speed_modifier_base", self.speed_modifier_base),
            ("speed_modifier_step", self.speed_modifier_step),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }

        if self.coin_width >= self.screen_width {
            return Err(SimError::InvalidConfig(format!(
                "coin_width {} must be smaller than screen_width {}",
                self.coin_width, self.screen_width
            )));
        }
        if self.coin_count == 0 {
            return Err(SimError::InvalidConfig("coin_count must be at least 1".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::InvalidConfig(
                "max_placement_attempts must be at least 1".into(),
            ));
        }
        if let Some(cap) = self.max_speed_modifier {
            if !(cap >= self.speed_modifier_base) {
                return Err(SimError::InvalidConfig(format!(
                    "max_speed_modifier {cap} is below speed_modifier_base {}",
                    self.speed_modifier_base
                )));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn coin_size(&self) -> Vec2 {
        Vec2::new(self.coin_width, self.coin_height)
    }

    #[inline]
    pub fn catcher_size(&self) -> Vec2 {
        Vec2::new(self.catcher_width, self.catcher_height)
    }

    /// Catcher start position: horizontally centred, resting above the bottom margin
    pub fn catcher_start(&self) -> Vec2 {
        Vec2::new(
            self.screen_width / 2.0 - self.catcher_width / 2.0,
            self.screen_height - self.catcher_height - self.catcher_bottom_margin,
        )
    }

    /// Largest x a coin may take while staying fully on screen
    #[inline]
    pub fn coin_max_x(&self) -> f32 {
        self.screen_width - self.coin_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = SimConfig::from_json(r#"{ "screen_width": 500.0, "coin_count": 4 }"#)
            .expect("valid config");
        assert_eq!(config.screen_width, 500.0);
        assert_eq!(config.coin_count, 4);
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
        assert_eq!(config.max_speed_modifier, None);
    }

    #[test]
    fn test_json_roundtrip_preserves_cap() {
        let config = SimConfig {
            max_speed_modifier: Some(2.5),
            ..SimConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_coin_wider_than_screen() {
        let err = SimConfig::from_json(r#"{ "screen_width": 30.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_attempts_and_coins() {
        let config = SimConfig {
            max_placement_attempts: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            coin_count: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_step_and_low_cap() {
        let config = SimConfig {
            speed_modifier_step: -0.1,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            max_speed_modifier: Some(0.05),
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_catcher_start_rests_above_margin() {
        let config = SimConfig::with_screen(400.0, 800.0);
        let start = config.catcher_start();
        assert_eq!(start.x, 150.0);
        assert_eq!(start.y, 800.0 - 120.0 - 20.0);
    }
}

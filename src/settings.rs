//! Simulation tuning
//!
//! Loaded from JSON by the outer driver; every missing field falls back to
//! the value in [`crate::consts`].

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Physics and timing parameters for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Tile edge length (pixels)
    pub tile_size: f64,
    /// Simulation ticks per simulated second
    pub ticks_per_second: f64,
    /// Time limit (seconds); the episode times out once elapsed time exceeds it
    pub max_time: f64,

    // === Movement ===
    /// Horizontal speed set by left/right input
    pub run_speed: f64,
    /// Peak jump speed
    pub jump_speed: f64,
    /// Per-tick upward thrust while jump is held
    pub jump_thrust: f64,
    /// Horizontal damping divisor
    pub inertia: f64,
    /// Per-tick downward acceleration
    pub gravity: f64,

    // === Scoring ===
    /// Fitness bonus for reaching the finish
    pub completion_bonus: f64,

    /// Player footprint (pixels)
    pub player_size: DVec2,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
            max_time: MAX_TIME,

            run_speed: V_X,
            jump_speed: V_JUMP,
            jump_thrust: JUMP_THRUST,
            inertia: INERTIA,
            gravity: GRAVITY,

            completion_bonus: COMPLETION_BONUS,

            player_size: DVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl SimConfig {
    /// Duration of one tick (seconds)
    #[inline]
    pub fn tick_duration(&self) -> f64 {
        1.0 / self.ticks_per_second
    }

    /// Half of the player footprint
    #[inline]
    pub fn player_half_extent(&self) -> DVec2 {
        self.player_size / 2.0
    }

    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded sim config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

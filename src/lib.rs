//! Tilerun - a deterministic tile platformer used as a fitness substrate
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, body physics, episode state, perception)
//! - `settings`: Data-driven physics and timing tuning
//! - `error`: Error types shared by the simulation and level loading

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{LevelError, SimError};
pub use settings::SimConfig;
pub use sim::{EndCause, Game, TickInput, WindowSize};

/// Game configuration constants
pub mod consts {
    /// Edge length of one square tile (pixels)
    pub const TILE_SIZE: f64 = 32.0;
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: f64 = 60.0;
    /// Episode time limit (seconds of simulated time)
    pub const MAX_TIME: f64 = 30.0;

    /// Horizontal speed set while left/right is held (pixels/tick)
    pub const V_X: f64 = 6.0;
    /// Peak upward jump speed (pixels/tick)
    pub const V_JUMP: f64 = 8.5;
    /// Upward acceleration while the jump button is held
    pub const JUMP_THRUST: f64 = 1.5;
    /// Horizontal velocity divisor applied every tick
    pub const INERTIA: f64 = 1.4;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f64 = 0.3;

    /// Fitness awarded for reaching the finish
    pub const COMPLETION_BONUS: f64 = 2000.0;

    /// Player footprint (pixels)
    pub const PLAYER_WIDTH: f64 = 22.0;
    pub const PLAYER_HEIGHT: f64 = 23.0;
}

/// Round half to even, the rounding used when committing body positions
#[inline]
pub fn round_even(v: glam::DVec2) -> glam::DVec2 {
    glam::DVec2::new(v.x.round_ties_even(), v.y.round_ties_even())
}

/// Pixel position to tile coordinate (floor division)
#[inline]
pub fn pixel_to_tile(pos: glam::DVec2, tile_size: f64) -> glam::IVec2 {
    (pos / tile_size).floor().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, IVec2};

    #[test]
    fn test_round_even_ties() {
        let r = round_even(DVec2::new(372.5, 373.5));
        assert_eq!(r, DVec2::new(372.0, 374.0));
        let r = round_even(DVec2::new(-0.5, 1.4999));
        assert_eq!(r, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_pixel_to_tile_floors_negatives() {
        assert_eq!(pixel_to_tile(DVec2::new(31.9, 32.0), 32.0), IVec2::new(0, 1));
        assert_eq!(pixel_to_tile(DVec2::new(-0.1, -32.0), 32.0), IVec2::new(-1, -1));
    }
}

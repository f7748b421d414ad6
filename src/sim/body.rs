//! Kinematic body integration against the tile grid
//!
//! Collision is predictive: the body looks one pixel past where its velocity
//! would carry it, resolves horizontal contacts first, then vertical contacts
//! against the resolved horizontal position, and only then commits the move.
//! The step order is part of the determinism contract and must not change.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use super::tile::{Side, Touch};
use crate::settings::SimConfig;
use crate::{pixel_to_tile, round_even};

/// Outcome of one body step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nothing terminal happened
    None,
    /// Touched a hazard with the lethal edge
    Death,
    /// Stood on the finish line
    Complete,
}

/// A dynamic entity moving through the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Center position (pixels)
    pub pos: DVec2,
    /// Velocity (pixels/tick, +y is down)
    pub vel: DVec2,
    /// Half of the body footprint
    pub half: DVec2,
    /// Tile containing `pos`, refreshed on every commit
    pub tile: IVec2,
    pub can_jump: bool,
    /// Variable-height jump thrust is active
    pub is_jumping: bool,
    pub standing: bool,
}

#[inline]
fn floor_tile(v: f64, tile_size: f64) -> i32 {
    (v / tile_size).floor() as i32
}

#[inline]
fn trunc_tile(v: f64, tile_size: f64) -> i32 {
    (v / tile_size).trunc() as i32
}

impl PhysicsBody {
    /// Create a body at rest, ready to jump
    pub fn new(pos: DVec2, half: DVec2, tile_size: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            half,
            tile: pixel_to_tile(pos, tile_size),
            can_jump: true,
            is_jumping: false,
            standing: true,
        }
    }

    /// Advance one tick.
    ///
    /// The caller must stop the episode on anything other than
    /// [`Contact::None`].
    pub fn step(&mut self, grid: &TileGrid, config: &SimConfig, jump: bool) -> Contact {
        let ts = config.tile_size;

        // Jump trigger; an airborne trigger gets the full impulse at once
        if jump && self.can_jump {
            self.can_jump = false;
            self.is_jumping = true;
            if !self.standing {
                self.vel.y = -config.jump_speed;
            }
        }

        // Releasing the button ends the thrust early
        if !jump && self.is_jumping {
            self.is_jumping = false;
        }

        if self.is_jumping {
            self.vel.y -= config.jump_thrust;
            if self.vel.y <= -config.jump_speed {
                self.is_jumping = false;
                self.vel.y = -config.jump_speed;
            }
        }

        self.vel.y += config.gravity;
        self.vel.x /= config.inertia;

        // Predicted edges, one pixel past the moved footprint
        let next = self.pos + self.vel;
        let feet_row = floor_tile(next.y + self.half.y + 1.0, ts);
        let head_row = floor_tile(next.y - self.half.y - 1.0, ts);
        let right_col = floor_tile(next.x + self.half.x + 1.0, ts);
        let left_col = floor_tile(next.x - self.half.x - 1.0, ts);

        // Rows currently spanned, for side tests
        let top_row = trunc_tile(self.pos.y - self.half.y, ts);
        let bottom_row = trunc_tile(self.pos.y + self.half.y, ts);

        if grid.is_solid(bottom_row, right_col) || grid.is_solid(top_row, right_col) {
            self.vel.x = 0.0;
            self.pos.x = f64::from(right_col) * ts - self.half.x - 1.0;
        }

        if grid.is_solid(bottom_row, left_col) || grid.is_solid(top_row, left_col) {
            self.vel.x = 0.0;
            self.pos.x = f64::from(left_col + 1) * ts + self.half.x;
        }

        // Columns under the horizontally resolved footprint
        let foot_right = trunc_tile(self.pos.x + self.half.x, ts);
        let foot_left = trunc_tile(self.pos.x - self.half.x, ts);

        self.standing = false;
        if grid.is_solid(feet_row, foot_left) || grid.is_solid(feet_row, foot_right) {
            self.vel.y = 0.0;
            self.can_jump = true;
            self.standing = true;
            self.pos.y = f64::from(feet_row) * ts - self.half.y;

            let left = grid.tile_at(feet_row, foot_left).touch(Side::Feet);
            let right = grid.tile_at(feet_row, foot_right).touch(Side::Feet);
            if left == Touch::Kill || right == Touch::Kill {
                return Contact::Death;
            }
            if left == Touch::Finish {
                return Contact::Complete;
            }
        }

        if grid.is_solid(head_row, foot_left) || grid.is_solid(head_row, foot_right) {
            // Only a body still moving up bumps its head
            if self.vel.y < 0.0 {
                self.vel.y = 0.0;
                self.is_jumping = false;

                let left = grid.tile_at(head_row, foot_left).touch(Side::Head);
                let right = grid.tile_at(head_row, foot_right).touch(Side::Head);
                if left == Touch::Kill || right == Touch::Kill {
                    self.pos.y = f64::from(head_row + 1) * ts + self.half.y;
                    return Contact::Death;
                }
            }
            self.pos.y = f64::from(head_row + 1) * ts + self.half.y;
        }

        self.pos = round_even(self.pos + self.vel);
        self.tile = pixel_to_tile(self.pos, ts);

        Contact::None
    }
}

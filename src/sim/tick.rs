//! Fixed timestep simulation tick
//!
//! Owns one level and one player and advances the episode deterministically
//! until it dies, times out or completes.

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Contact, PhysicsBody};
use super::grid::TileGrid;
use super::level::{ChunkGenerator, Level, LevelGenerator, check_spawn};
use super::perception::{PaddedGrid, TileWindow, WindowSize};
use super::state::{EndCause, PlayerState, Termination};
use crate::error::SimError;
use crate::settings::SimConfig;

/// Key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Fourth agent output slot; carried but ignored
    pub spare: bool,
}

impl TickInput {
    pub const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        jump: false,
        spare: false,
    };

    /// Number of held movement keys
    pub fn held_count(&self) -> u32 {
        u32::from(self.left) + u32::from(self.right) + u32::from(self.jump)
    }
}

impl From<[bool; 4]> for TickInput {
    /// Agent slot order: left, right, jump, spare
    fn from([left, right, jump, spare]: [bool; 4]) -> Self {
        Self {
            left,
            right,
            jump,
            spare,
        }
    }
}

/// One episode
#[derive(Debug, Clone)]
pub struct Game {
    config: SimConfig,
    grid: Arc<TileGrid>,
    spawn: IVec2,
    perception: Option<PaddedGrid>,
    player: PlayerState,
    termination: Termination,
    ticks: u64,
}

impl Game {
    /// Generate a level with the built-in generator and default tuning
    pub fn new(num_chunks: usize, seed: u64, window: Option<WindowSize>) -> Result<Self, SimError> {
        Self::generate(
            &ChunkGenerator::default(),
            num_chunks,
            seed,
            window,
            SimConfig::default(),
        )
    }

    pub fn generate(
        generator: &impl LevelGenerator,
        num_chunks: usize,
        seed: u64,
        window: Option<WindowSize>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        let level = generator.generate(num_chunks, seed)?;
        Self::from_level(level, window, config)
    }

    pub fn from_level(
        level: Level,
        window: Option<WindowSize>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        Self::with_grid(Arc::new(level.grid), level.spawn, window, config)
    }

    /// Build a game on a grid that may be shared with other games
    pub fn with_grid(
        grid: Arc<TileGrid>,
        spawn: IVec2,
        window: Option<WindowSize>,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        check_spawn(&grid, spawn)?;
        if let Some(size) = window {
            // Re-validate sizes built by hand rather than through WindowSize::new
            WindowSize::new(size.rows, size.cols)?;
        }
        let perception = window.map(|size| PaddedGrid::new(&grid, size));

        let pos = spawn.as_dvec2() * config.tile_size;
        let body = PhysicsBody::new(pos, config.player_half_extent(), config.tile_size);

        log::info!(
            "Episode setup: {}x{} level, spawn tile ({}, {}), perception {}",
            grid.width(),
            grid.height(),
            spawn.x,
            spawn.y,
            window.map_or("off".to_string(), |w| format!("{}x{}", w.rows, w.cols)),
        );

        Ok(Self {
            config,
            grid,
            spawn,
            perception,
            player: PlayerState::new(body),
            termination: Termination::default(),
            ticks: 0,
        })
    }

    /// Advance the episode by one tick
    pub fn update(&mut self, input: &TickInput) {
        if let Some(cause) = self.termination.cause() {
            log::warn!(
                "update() called after the episode ended ({}); ignoring",
                cause.as_str()
            );
            return;
        }

        self.ticks += 1;
        // No floor below the grid: falling out is detected by position
        let floor = self.grid.height() as f64 * self.config.tile_size;
        let player = &mut self.player;

        player.elapsed_time += self.config.tick_duration();
        if player.elapsed_time > self.config.max_time {
            self.finish(EndCause::Timeout);
            return;
        }

        // Right is applied last so it wins when both are held
        if input.left {
            player.body.vel.x = -self.config.run_speed;
        }
        if input.right {
            player.body.vel.x = self.config.run_speed;
        }
        player.press_count = player
            .press_count
            .saturating_add(u64::from(input.held_count()));

        let contact = player.body.step(&self.grid, &self.config, input.jump);
        let fell_out = player.body.pos.y >= floor;

        match contact {
            Contact::Death => self.finish(EndCause::Dead),
            _ if fell_out => self.finish(EndCause::Dead),
            Contact::Complete => {
                player.fitness += self.config.completion_bonus;
                self.finish(EndCause::Complete);
            }
            Contact::None => player.fitness += player.body.vel.x,
        }
    }

    fn finish(&mut self, cause: EndCause) {
        if self.termination.end(cause) {
            log::info!(
                "Episode over after {} ticks: {} (fitness {:.2})",
                self.ticks,
                cause.as_str(),
                self.player.fitness
            );
        }
    }

    /// Tiles around the player's current tile
    pub fn extract_window(&self) -> Result<TileWindow, SimError> {
        let padded = self.perception.as_ref().ok_or(SimError::PerceptionDisabled)?;
        Ok(padded.extract(self.player.body.tile))
    }

    #[inline]
    pub fn perception_enabled(&self) -> bool {
        self.perception.is_some()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.termination.is_over()
    }

    #[inline]
    pub fn cause(&self) -> Option<EndCause> {
        self.termination.cause()
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.player.fitness
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[inline]
    pub fn grid(&self) -> &Arc<TileGrid> {
        &self.grid
    }

    #[inline]
    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks processed while running (calls after the end are not counted)
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

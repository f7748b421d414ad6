//! Deterministic simulation module
//!
//! All episode logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level generation)
//! - Fixed step order inside a tick
//! - No rendering, pacing or I/O

pub mod body;
pub mod controller;
pub mod grid;
pub mod level;
pub mod perception;
pub mod state;
pub mod tick;
pub mod tile;

pub use body::{Contact, PhysicsBody};
pub use controller::{Controller, EpisodeReport, HoldKeys, Replay, Sprinter};
pub use grid::TileGrid;
pub use level::{ChunkGenerator, Level, LevelGenerator};
pub use perception::{PaddedGrid, TileWindow, WindowSize};
pub use state::{EndCause, PlayerState, Termination};
pub use tick::{Game, TickInput};
pub use tile::{Side, Tile, Touch};

//! Fixed-size tile windows around the player
//!
//! The level is padded once at setup so every window is a plain slice copy:
//! side borders read as walls, the top border as ceiling spikes and the
//! bottom border as floor spikes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use super::tile::Tile;
use crate::error::SimError;

/// Window dimensions in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub rows: usize,
    pub cols: usize,
}

impl WindowSize {
    pub fn new(rows: usize, cols: usize) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::InvalidWindow { rows, cols });
        }
        Ok(Self { rows, cols })
    }
}

/// Level copy with a border wide enough for any window origin inside the grid
#[derive(Debug, Clone)]
pub struct PaddedGrid {
    size: WindowSize,
    grid_width: usize,
    grid_height: usize,
    width: usize,
    tiles: Vec<Tile>,
}

impl PaddedGrid {
    pub fn new(grid: &TileGrid, size: WindowSize) -> Self {
        let pad_r = size.rows / 2;
        let pad_c = size.cols / 2;
        let width = grid.width() + 2 * pad_c;
        let height = grid.height() + 2 * pad_r;

        let mut tiles = vec![Tile::Empty; width * height];
        for (row, cells) in tiles.chunks_mut(width).enumerate() {
            if row < pad_r {
                cells.fill(Tile::SpikeBottom);
            } else if row >= pad_r + grid.height() {
                cells.fill(Tile::SpikeTop);
            } else {
                cells[..pad_c].fill(Tile::Cobble);
                cells[pad_c + grid.width()..].fill(Tile::Cobble);
            }
        }

        for (row, cells) in grid.rows().enumerate() {
            let start = (row + pad_r) * width + pad_c;
            tiles[start..start + grid.width()].copy_from_slice(cells);
        }

        log::debug!(
            "Padded {}x{} grid to {}x{} for {}x{} windows",
            grid.width(),
            grid.height(),
            width,
            height,
            size.rows,
            size.cols
        );

        Self {
            size,
            grid_width: grid.width(),
            grid_height: grid.height(),
            width,
            tiles,
        }
    }

    #[inline]
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Copy out the window centered on `tile` (column, row).
    ///
    /// Tiles outside the level are clamped to its edge first, so the window
    /// is always full size.
    pub fn extract(&self, tile: IVec2) -> TileWindow {
        let col = tile.x.clamp(0, self.grid_width as i32 - 1) as usize;
        let row = tile.y.clamp(0, self.grid_height as i32 - 1) as usize;
        let WindowSize { rows, cols } = self.size;

        let mut cells = Vec::with_capacity(rows * cols);
        for r in row..row + rows {
            let start = r * self.width + col;
            cells.extend_from_slice(&self.tiles[start..start + cols]);
        }

        TileWindow { rows, cols, cells }
    }
}

/// An owned rows x cols snapshot of tiles, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileWindow {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Tile>,
}

impl TileWindow {
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Window cell holding the player's own tile
    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.cols)
    }

    /// Row-major agent inputs (see [`Tile::activation`])
    pub fn to_inputs(&self) -> Vec<f32> {
        self.cells.iter().map(|t| t.activation()).collect()
    }
}

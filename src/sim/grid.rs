//! Static tile grid and collision queries
//!
//! The grid is immutable once built. Solidity is precomputed into a mask of
//! the same shape so the collision path never matches on tile kinds.

use super::tile::Tile;
use crate::error::LevelError;

/// Row-major tile grid for one level
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    solid: Vec<bool>,
}

impl TileGrid {
    /// Build a grid from rows of tiles (row 0 is the top of the level)
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(LevelError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            tiles.extend(cells);
        }

        let solid = tiles.iter().map(|t| t.is_solid()).collect();
        Ok(Self {
            width,
            height,
            tiles,
            solid,
        })
    }

    /// Build a grid from raw tile codes
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let mut out = Vec::with_capacity(rows.len());
        for (row, codes) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(codes.len());
            for (col, &code) in codes.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(LevelError::UnknownTile {
                    symbol: char::from(code),
                    row,
                    col,
                })?;
                cells.push(tile);
            }
            out.push(cells);
        }
        Self::from_rows(out)
    }

    /// Build a grid from text rows using [`Tile::symbol`] characters.
    ///
    /// `S` reads as an empty cell so spawn markers can sit inside the art.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, LevelError> {
        let mut out = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let tile = match symbol {
                    'S' => Tile::Empty,
                    _ => Tile::from_symbol(symbol)
                        .ok_or(LevelError::UnknownTile { symbol, row, col })?,
                };
                cells.push(tile);
            }
            out.push(cells);
        }
        Self::from_rows(out)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let in_bounds =
            row >= 0 && (row as usize) < self.height && col >= 0 && (col as usize) < self.width;
        in_bounds.then(|| row as usize * self.width + col as usize)
    }

    /// Tile at (row, col); `None` outside the grid
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        self.index(row, col).map(|i| self.tiles[i])
    }

    /// Tile at (row, col), reading anything outside the grid as empty
    #[inline]
    pub fn tile_at(&self, row: i32, col: i32) -> Tile {
        self.get(row, col).unwrap_or(Tile::Empty)
    }

    /// Collision query.
    ///
    /// Columns outside the grid are walls. Rows above or below the grid are
    /// open: there is no ceiling, and falling out the bottom is detected by
    /// position rather than by collision.
    #[inline]
    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        if col < 0 || col as usize >= self.width {
            return true;
        }
        if row < 0 || row as usize >= self.height {
            return false;
        }
        self.solid[row as usize * self.width + col as usize]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Render the grid with [`Tile::symbol`] characters, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|t| t.symbol()));
            out.push('\n');
        }
        out
    }
}

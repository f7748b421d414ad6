//! Tile vocabulary

use serde::{Deserialize, Serialize};

/// A tile code stored in the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Grass = 1,
    Dirt = 2,
    Cobble = 3,
    Bricks = 4,
    PipeTop = 5,
    PipeMiddle = 6,
    PipeBottom = 7,
    /// Spikes pointing up; lethal when stood upon
    SpikeTop = 8,
    /// Spikes pointing down; lethal when hit from below
    SpikeBottom = 9,
    /// Finish line surface; completes the level when stood upon
    FinishTop = 10,
    /// Decorative flag pole, not solid
    Flag = 11,
}

/// Which edge of a body is touching a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Feet,
    Head,
}

/// Effect of touching a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Nothing,
    Kill,
    Finish,
}

impl Tile {
    pub const ALL: [Tile; 12] = [
        Tile::Empty,
        Tile::Grass,
        Tile::Dirt,
        Tile::Cobble,
        Tile::Bricks,
        Tile::PipeTop,
        Tile::PipeMiddle,
        Tile::PipeBottom,
        Tile::SpikeTop,
        Tile::SpikeBottom,
        Tile::FinishTop,
        Tile::Flag,
    ];

    /// Whether the tile blocks body movement
    pub fn is_solid(self) -> bool {
        match self {
            Tile::Empty | Tile::Flag => false,
            Tile::Grass
            | Tile::Dirt
            | Tile::Cobble
            | Tile::Bricks
            | Tile::PipeTop
            | Tile::PipeMiddle
            | Tile::PipeBottom
            | Tile::SpikeTop
            | Tile::SpikeBottom
            | Tile::FinishTop => true,
        }
    }

    /// Effect of touching this tile with the given edge
    pub fn touch(self, side: Side) -> Touch {
        match (self, side) {
            (Tile::SpikeTop, Side::Feet) => Touch::Kill,
            (Tile::SpikeBottom, Side::Head) => Touch::Kill,
            (Tile::FinishTop, Side::Feet) => Touch::Finish,
            (Tile::SpikeTop | Tile::FinishTop, Side::Head) | (Tile::SpikeBottom, Side::Feet) => {
                Touch::Nothing
            }
            (
                Tile::Empty
                | Tile::Grass
                | Tile::Dirt
                | Tile::Cobble
                | Tile::Bricks
                | Tile::PipeTop
                | Tile::PipeMiddle
                | Tile::PipeBottom
                | Tile::Flag,
                _,
            ) => Touch::Nothing,
        }
    }

    /// Stable numeric code
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Agent input encoding: empty 0, solid 1/3, spike-top 2/3, spike-bottom 1
    pub fn activation(self) -> f32 {
        match self {
            Tile::Empty | Tile::Flag => 0.0,
            Tile::Grass
            | Tile::Dirt
            | Tile::Cobble
            | Tile::Bricks
            | Tile::PipeTop
            | Tile::PipeMiddle
            | Tile::PipeBottom
            | Tile::FinishTop => 1.0 / 3.0,
            Tile::SpikeTop => 2.0 / 3.0,
            Tile::SpikeBottom => 1.0,
        }
    }

    /// Text symbol used by [`super::Level::parse`]
    pub fn symbol(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Grass => '#',
            Tile::Dirt => 'd',
            Tile::Cobble => 'c',
            Tile::Bricks => 'B',
            Tile::PipeTop => 'T',
            Tile::PipeMiddle => 'M',
            Tile::PipeBottom => 'P',
            Tile::SpikeTop => '^',
            Tile::SpikeBottom => 'v',
            Tile::FinishTop => 'F',
            Tile::Flag => '|',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == symbol)
    }
}

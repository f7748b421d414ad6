//! Level construction
//!
//! Levels come from a [`LevelGenerator`], a pure function of chunk count and
//! seed. [`ChunkGenerator`] is the built-in one: a strip of fixed-width
//! chunks, each drawn from a small set of obstacle patterns.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::TileGrid;
use super::tile::Tile;
use crate::error::{LevelError, SimError};

/// A tile grid plus the player's spawn tile
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub grid: TileGrid,
    /// Spawn tile as (column, row)
    pub spawn: IVec2,
}

impl Level {
    pub fn new(grid: TileGrid, spawn: IVec2) -> Result<Self, LevelError> {
        check_spawn(&grid, spawn)?;
        Ok(Self { grid, spawn })
    }

    /// Parse a level drawn with [`Tile::symbol`] characters; `S` marks the spawn.
    pub fn parse(rows: &[&str]) -> Result<Self, LevelError> {
        let grid = TileGrid::from_ascii(rows)?;
        let spawn = rows
            .iter()
            .enumerate()
            .find_map(|(row, line)| line.find('S').map(|col| IVec2::new(col as i32, row as i32)))
            .ok_or(LevelError::MissingSpawn)?;
        Self::new(grid, spawn)
    }
}

/// Fails unless `spawn` (column, row) is a tile of `grid`
pub(crate) fn check_spawn(grid: &TileGrid, spawn: IVec2) -> Result<(), LevelError> {
    if grid.get(spawn.y, spawn.x).is_none() {
        return Err(LevelError::SpawnOutOfBounds {
            col: spawn.x,
            row: spawn.y,
            width: grid.width(),
            height: grid.height(),
        });
    }
    Ok(())
}

/// Source of levels for episodes
pub trait LevelGenerator {
    /// Build the level for `(num_chunks, seed)`. Must be deterministic.
    fn generate(&self, num_chunks: usize, seed: u64) -> Result<Level, SimError>;
}

/// Obstacle pattern for one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Flat,
    Gap,
    Spikes,
    Pipe,
    Platform,
    Stairs,
    Finish,
}

impl ChunkKind {
    const OBSTACLES: [ChunkKind; 6] = [
        ChunkKind::Flat,
        ChunkKind::Gap,
        ChunkKind::Spikes,
        ChunkKind::Pipe,
        ChunkKind::Platform,
        ChunkKind::Stairs,
    ];
}

/// Chunked level generator seeded with PCG32
#[derive(Debug, Clone)]
pub struct ChunkGenerator {
    /// Columns per chunk
    pub chunk_width: usize,
    /// Level height in rows
    pub height: usize,
    /// Row of the ground surface
    pub ground_row: usize,
}

impl ChunkGenerator {
    /// Narrowest chunk that fits every obstacle pattern
    pub const MIN_CHUNK_WIDTH: usize = 16;
    /// Rows needed above the ground for the platform and flag patterns
    pub const MIN_HEADROOM: usize = 4;

    /// Fails if the patterns would reach outside a chunk or the grid
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.chunk_width < Self::MIN_CHUNK_WIDTH
            || self.ground_row < Self::MIN_HEADROOM
            || self.ground_row >= self.height
        {
            return Err(LevelError::InvalidGenerator {
                chunk_width: self.chunk_width,
                height: self.height,
                ground_row: self.ground_row,
            });
        }
        Ok(())
    }
}

impl Default for ChunkGenerator {
    fn default() -> Self {
        Self {
            chunk_width: 16,
            height: 16,
            ground_row: 12,
        }
    }
}

impl LevelGenerator for ChunkGenerator {
    fn generate(&self, num_chunks: usize, seed: u64) -> Result<Level, SimError> {
        if num_chunks == 0 {
            return Err(SimError::InvalidChunkCount);
        }
        self.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let width = num_chunks * self.chunk_width;
        let mut rows = vec![vec![Tile::Empty; width]; self.height];

        for chunk in 0..num_chunks {
            let kind = if chunk == num_chunks - 1 {
                ChunkKind::Finish
            } else if chunk == 0 {
                ChunkKind::Flat
            } else {
                ChunkKind::OBSTACLES[rng.random_range(0..ChunkKind::OBSTACLES.len())]
            };
            log::debug!("Chunk {chunk}: {kind:?}");
            self.fill_chunk(&mut rows, chunk * self.chunk_width, kind, &mut rng);
        }

        let spawn = IVec2::new(1, self.ground_row as i32 - 1);
        let grid = TileGrid::from_rows(rows)?;
        log::info!(
            "Generated level seed={seed} chunks={num_chunks} size={}x{}",
            grid.width(),
            grid.height()
        );
        Ok(Level::new(grid, spawn)?)
    }
}

impl ChunkGenerator {
    fn fill_chunk(&self, rows: &mut [Vec<Tile>], x0: usize, kind: ChunkKind, rng: &mut Pcg32) {
        let w = self.chunk_width;
        let ground = self.ground_row;

        // Ground for the whole chunk, carved by the patterns below
        for col in x0..x0 + w {
            rows[ground][col] = Tile::Grass;
            for row in rows.iter_mut().skip(ground + 1) {
                row[col] = Tile::Dirt;
            }
        }

        match kind {
            ChunkKind::Flat => {}
            ChunkKind::Gap => {
                let start = x0 + rng.random_range(5..=9);
                let len = rng.random_range(2..=3);
                for col in start..start + len {
                    for row in rows.iter_mut().skip(ground) {
                        row[col] = Tile::Empty;
                    }
                }
            }
            ChunkKind::Spikes => {
                let start = x0 + rng.random_range(4..=10);
                let len = rng.random_range(1..=3);
                for col in start..start + len {
                    rows[ground][col] = Tile::SpikeTop;
                }
            }
            ChunkKind::Pipe => {
                let col = x0 + rng.random_range(6..=10);
                let tall = rng.random_range(2..=3);
                let top = ground - tall;
                for row in top..ground {
                    rows[row][col] = if row == top {
                        Tile::PipeTop
                    } else if row == ground - 1 {
                        Tile::PipeBottom
                    } else {
                        Tile::PipeMiddle
                    };
                }
            }
            ChunkKind::Platform => {
                let start = x0 + rng.random_range(3..=6);
                let len = rng.random_range(4..=6);
                let row = ground - 4;
                for col in start..start + len {
                    rows[row][col] = if rng.random_bool(0.3) {
                        Tile::SpikeBottom
                    } else {
                        Tile::Bricks
                    };
                }
            }
            ChunkKind::Stairs => {
                let start = x0 + rng.random_range(4..=8);
                for step in 0..3 {
                    for row in ground - 1 - step..ground {
                        rows[row][start + step] = Tile::Cobble;
                    }
                }
            }
            ChunkKind::Finish => {
                let pole = x0 + w / 2;
                for row in ground - 4..ground {
                    rows[row][pole] = Tile::Flag;
                }
                for col in pole..x0 + w {
                    rows[ground][col] = Tile::FinishTop;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_finds_spawn() {
        let level = Level::parse(&["....", "..S.", "####"]).unwrap();
        assert_eq!(level.spawn, IVec2::new(2, 1));
        assert_eq!(level.grid.tile_at(1, 2), Tile::Empty);
    }

    #[test]
    fn test_parse_requires_spawn() {
        assert!(matches!(
            Level::parse(&["....", "####"]),
            Err(LevelError::MissingSpawn)
        ));
    }

    #[test]
    fn test_spawn_must_be_inside() {
        let grid = TileGrid::from_ascii(&["..", "##"]).unwrap();
        assert!(matches!(
            Level::new(grid, IVec2::new(2, 0)),
            Err(LevelError::SpawnOutOfBounds { col: 2, row: 0, .. })
        ));
    }

    #[test]
    fn test_zero_chunks_rejected() {
        let err = ChunkGenerator::default().generate(0, 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidChunkCount));
    }

    #[test]
    fn test_low_ground_rejected() {
        let generator = ChunkGenerator {
            ground_row: 2,
            ..ChunkGenerator::default()
        };
        for seed in 0..50 {
            assert!(matches!(
                generator.generate(6, seed),
                Err(SimError::Level(LevelError::InvalidGenerator { ground_row: 2, .. }))
            ));
        }
    }

    #[test]
    fn test_generator_bounds() {
        let narrow = ChunkGenerator {
            chunk_width: 8,
            ..ChunkGenerator::default()
        };
        assert!(narrow.validate().is_err());

        let buried = ChunkGenerator {
            ground_row: 16,
            ..ChunkGenerator::default()
        };
        assert!(buried.generate(3, 1).is_err());

        // Smallest accepted settings still generate every pattern without panicking
        let tight = ChunkGenerator {
            chunk_width: 16,
            height: 5,
            ground_row: 4,
        };
        for seed in 0..50 {
            let level = tight.generate(8, seed).unwrap();
            assert_eq!(level.grid.height(), 5);
            assert_eq!(level.spawn, IVec2::new(1, 3));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = ChunkGenerator::default();
        let a = generator.generate(10, 1569986158).unwrap();
        let b = generator.generate(10, 1569986158).unwrap();
        assert_eq!(a, b);

        let c = generator.generate(10, 7).unwrap();
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn test_generated_layout() {
        let generator = ChunkGenerator::default();
        let level = generator.generate(6, 42).unwrap();
        let grid = &level.grid;
        assert_eq!(grid.width(), 6 * 16);
        assert_eq!(grid.height(), 16);

        // Spawn sits on the flat start chunk
        assert_eq!(level.spawn, IVec2::new(1, 11));
        assert_eq!(grid.tile_at(11, 1), Tile::Empty);
        assert_eq!(grid.tile_at(12, 0), Tile::Grass);
        assert_eq!(grid.tile_at(12, 1), Tile::Grass);

        // Finish strip and flag in the last chunk
        let last = (grid.width() - 1) as i32;
        assert_eq!(grid.tile_at(12, last), Tile::FinishTop);
        assert_eq!(grid.tile_at(11, 5 * 16 + 8), Tile::Flag);
        let finish_count = grid
            .rows()
            .flatten()
            .filter(|t| **t == Tile::FinishTop)
            .count();
        assert_eq!(finish_count, 8);
    }

    #[test]
    fn test_single_chunk_is_finish() {
        let level = ChunkGenerator::default().generate(1, 3).unwrap();
        assert_eq!(level.grid.tile_at(12, 15), Tile::FinishTop);
        assert_eq!(level.grid.tile_at(12, 1), Tile::Grass);
    }
}

//! Error types for the simulation and level loading.

/// Errors raised while building a level grid.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The level has no rows or no columns.
    #[error("level grid is empty")]
    Empty,

    /// A row does not match the width of the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Offending row index.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A character or code with no tile mapping.
    #[error("unknown tile {symbol:?} at row {row}, column {col}")]
    UnknownTile {
        /// The unrecognised symbol.
        symbol: char,
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// A text level without an `S` spawn marker.
    #[error("level has no spawn marker")]
    MissingSpawn,

    /// Generator settings that cannot hold the obstacle patterns.
    #[error(
        "generator with {chunk_width}-column chunks, {height} rows and ground at row {ground_row} is invalid"
    )]
    InvalidGenerator {
        chunk_width: usize,
        height: usize,
        ground_row: usize,
    },

    /// The spawn tile lies outside the grid.
    #[error("spawn tile ({col}, {row}) is outside the {width}x{height} grid")]
    SpawnOutOfBounds {
        col: i32,
        row: i32,
        width: usize,
        height: usize,
    },
}

/// Errors raised by simulation setup and queries.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Perception was requested on a game built without a window size.
    #[error("perception window is not configured for this game")]
    PerceptionDisabled,

    /// A window size with a zero dimension.
    #[error("invalid perception window {rows}x{cols}")]
    InvalidWindow { rows: usize, cols: usize },

    /// Levels need at least one chunk.
    #[error("level must have at least one chunk")]
    InvalidChunkCount,

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure maze-building system that converts raw cell codes into simulation state.
//!
//! The builder runs once per level. It reads rows of single-character cell
//! codes, lays down the static tile layer, registers crates and potions in the
//! entity index and records where the player starts. Crates, potions and the
//! player all stand on floor; they are never written into the tile layer.

use sokoban_core::{
    CellCoord, Entity, EntityIndex, MazeLayout, PlayerStats, PotionKind, Tile, TileGrid,
    FANCY_POTION, FLOOR, GOAL, MOVE_POTION, PLAYER, STRENGTH_POTION, WALL,
};
use thiserror::Error;
use tracing::debug;

/// Reasons a raw maze cannot be turned into a layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A cell used a code the builder does not understand.
    #[error("invalid maze symbol {symbol:?} at row {}, column {}", .cell.row(), .cell.column())]
    InvalidMazeSymbol {
        /// Offending character.
        symbol: char,
        /// Location of the offending character.
        cell: CellCoord,
    },
    /// The maze had no rows or no columns.
    #[error("maze is empty")]
    EmptyMaze,
    /// A row was shorter or longer than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// No player marker was present.
    #[error("maze has no player marker")]
    MissingPlayer,
    /// More than one player marker was present.
    #[error(
        "maze has a second player marker at row {}, column {} (first at row {}, column {})",
        .second.row(),
        .second.column(),
        .first.row(),
        .first.column()
    )]
    DuplicatePlayer {
        /// First marker encountered in row-major order.
        first: CellCoord,
        /// Next marker encountered.
        second: CellCoord,
    },
    /// The maze exceeded the addressable coordinate range.
    #[error("maze dimensions exceed the supported size")]
    TooLarge,
}

/// Decoded meaning of a single cell code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellCode {
    /// Impassable wall.
    Wall,
    /// Bare floor.
    Floor,
    /// Empty goal.
    Goal,
    /// Crate with the given strength, standing on floor.
    Crate(u32),
    /// Potion standing on floor.
    Potion(PotionKind),
    /// Player start, standing on floor.
    Player,
}

impl CellCode {
    /// Decodes a cell code, returning `None` for unknown characters.
    #[must_use]
    pub fn parse(symbol: char) -> Option<Self> {
        match symbol {
            WALL => Some(Self::Wall),
            FLOOR => Some(Self::Floor),
            GOAL => Some(Self::Goal),
            STRENGTH_POTION => Some(Self::Potion(PotionKind::Strength)),
            MOVE_POTION => Some(Self::Potion(PotionKind::Move)),
            FANCY_POTION => Some(Self::Potion(PotionKind::Fancy)),
            PLAYER => Some(Self::Player),
            digit => digit.to_digit(10).map(Self::Crate),
        }
    }

    /// Tile that lies underneath the decoded cell.
    #[must_use]
    pub const fn tile(self) -> Tile {
        match self {
            Self::Wall => Tile::Wall,
            Self::Goal => Tile::goal(),
            Self::Floor | Self::Crate(_) | Self::Potion(_) | Self::Player => Tile::Floor,
        }
    }

    /// Entity registered for the decoded cell, if any.
    #[must_use]
    pub const fn entity(self) -> Option<Entity> {
        match self {
            Self::Crate(strength) => Some(Entity::Crate { strength }),
            Self::Potion(kind) => Some(Entity::Potion(kind)),
            Self::Wall | Self::Floor | Self::Goal | Self::Player => None,
        }
    }
}

/// Splits a block of text into rows of cell codes, one row per line.
///
/// Trailing carriage returns are dropped so files saved with Windows line
/// endings build the same maze.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<Vec<char>> {
    text.lines()
        .map(|line| line.trim_end_matches('\r').chars().collect())
        .collect()
}

/// Converts raw rows of cell codes and the initial stats into a maze layout.
pub fn build<R: AsRef<[char]>>(rows: &[R], stats: PlayerStats) -> Result<MazeLayout, BuildError> {
    let expected = rows.first().map_or(0, |row| row.as_ref().len());
    if expected == 0 {
        return Err(BuildError::EmptyMaze);
    }
    let row_count = u32::try_from(rows.len()).map_err(|_| BuildError::TooLarge)?;
    let column_count = u32::try_from(expected).map_err(|_| BuildError::TooLarge)?;

    let mut tiles: Vec<Tile> = Vec::with_capacity(rows.len() * expected);
    let mut entities = EntityIndex::new();
    let mut player_start: Option<CellCoord> = None;

    for (row_index, row) in (0..row_count).zip(rows) {
        let row = row.as_ref();
        if row.len() != expected {
            return Err(BuildError::RaggedRow {
                row: row_index,
                expected: column_count,
                found: u32::try_from(row.len()).unwrap_or(u32::MAX),
            });
        }

        for (column_index, symbol) in (0..column_count).zip(row.iter().copied()) {
            let cell = CellCoord::new(row_index, column_index);
            let code =
                CellCode::parse(symbol).ok_or(BuildError::InvalidMazeSymbol { symbol, cell })?;

            if code == CellCode::Player {
                if let Some(first) = player_start {
                    return Err(BuildError::DuplicatePlayer {
                        first,
                        second: cell,
                    });
                }
                player_start = Some(cell);
            }

            if let Some(entity) = code.entity() {
                let _ = entities.insert(cell, entity);
            }
            tiles.push(code.tile());
        }
    }

    let player_start = player_start.ok_or(BuildError::MissingPlayer)?;
    let grid = TileGrid::from_tiles(row_count, column_count, tiles).ok_or(BuildError::TooLarge)?;

    debug!(
        rows = row_count,
        columns = column_count,
        crates = entities.values().filter(|entity| entity.is_crate()).count(),
        potions = entities.values().filter(|entity| !entity.is_crate()).count(),
        goals = grid.iter().filter(|(_, tile)| tile.is_goal()).count(),
        "maze_built"
    );

    Ok(MazeLayout {
        grid,
        entities,
        player_start,
        stats,
    })
}

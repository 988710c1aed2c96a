#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sokoban adapters.
//!
//! Adapters capture a [`Scene`] from read-only world data and hand it to a
//! [`RenderingBackend`]. The scene already resolves which symbol each cell
//! shows, so backends only decide how to draw it.

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use sokoban_core::{displayed_symbol, CellCoord, EntityIndex, TileGrid};

/// Player statistics shown beneath the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsPresentation {
    /// Moves left in the budget.
    pub moves_remaining: i32,
    /// Current strength.
    pub strength: i32,
}

/// Frozen picture of the maze ready to be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    rows: Vec<String>,
    /// Statistics displayed with the grid.
    pub stats: StatsPresentation,
}

impl Scene {
    /// Resolves the displayed symbol of every cell.
    ///
    /// The player is drawn over everything, entities over tiles.
    #[must_use]
    pub fn capture(
        grid: &TileGrid,
        entities: &EntityIndex,
        player_position: CellCoord,
        stats: StatsPresentation,
    ) -> Self {
        let rows = (0..grid.rows())
            .map(|row| {
                (0..grid.columns())
                    .map(|column| {
                        let cell = CellCoord::new(row, column);
                        displayed_symbol(grid, entities, player_position, cell).unwrap_or(' ')
                    })
                    .collect()
            })
            .collect();
        Self { rows, stats }
    }

    /// Rendered grid rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        writeln!(f, "Moves remaining: {}", self.stats.moves_remaining)?;
        write!(f, "Strength: {}", self.stats.strength)
    }
}

/// Rendering backend capable of presenting Sokoban scenes.
pub trait RenderingBackend {
    /// Presents one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend drawing scenes as plain text into any writer.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Wraps the writer that receives every frame.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Mutable access to the underlying writer.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Releases the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        writeln!(self.out, "{scene}").context("failed to write frame")?;
        writeln!(self.out).context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sokoban_core::{Entity, PotionKind, Tile};

    fn sample_scene() -> Scene {
        let grid = TileGrid::from_tiles(
            2,
            4,
            vec![
                Tile::Wall,
                Tile::Floor,
                Tile::Floor,
                Tile::goal(),
                Tile::Wall,
                Tile::Floor,
                Tile::Goal { filled: true },
                Tile::Floor,
            ],
        )
        .expect("grid");
        let mut entities = EntityIndex::new();
        let _ = entities.insert(CellCoord::new(0, 2), Entity::Crate { strength: 4 });
        let _ = entities.insert(CellCoord::new(1, 3), Entity::Potion(PotionKind::Fancy));

        Scene::capture(
            &grid,
            &entities,
            CellCoord::new(0, 1),
            StatsPresentation {
                moves_remaining: 12,
                strength: 3,
            },
        )
    }

    #[test]
    fn capture_layers_player_over_entities_over_tiles() {
        let scene = sample_scene();
        assert_eq!(scene.rows(), ["WP4G".to_owned(), "W XF".to_owned()]);
    }

    #[test]
    fn text_backend_writes_grid_then_stats() {
        let mut backend = TextBackend::new(Vec::new());
        backend.present(&sample_scene()).expect("write to memory");

        let text = String::from_utf8(backend.into_inner()).expect("utf8");
        assert_eq!(text, "WP4G\nW XF\nMoves remaining: 12\nStrength: 3\n\n");
    }
}

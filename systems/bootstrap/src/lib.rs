#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Sokoban level for play.

use sokoban_core::PlayerStats;
use sokoban_system_maze_builder::{build, BuildError};
use sokoban_world::{query, LayoutError, World};
use thiserror::Error;
use tracing::info;

/// Reasons a level cannot be launched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// The raw maze could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The built layout violated a world invariant.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Produces a ready world and the data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds the maze from raw cell codes and hands it to a new world.
    pub fn launch<R: AsRef<[char]>>(
        &self,
        rows: &[R],
        stats: PlayerStats,
    ) -> Result<World, LaunchError> {
        let world = World::new(build(rows, stats)?)?;
        info!(
            rows = query::tile_grid(&world).rows(),
            columns = query::tile_grid(&world).columns(),
            crates = query::crate_count(&world),
            strength = stats.strength,
            moves = stats.moves,
            "level_ready"
        );
        Ok(world)
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }
}

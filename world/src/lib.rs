#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sokoban.
//!
//! The world exclusively owns the tile grid, the entity index and the player.
//! Every mutation flows through [`apply`] (or the [`World::attempt_move`] and
//! [`World::step`] conveniences built on it). A move is validated against the
//! current state before anything is touched, so a rejected move leaves the
//! world exactly as it was.

use sokoban_core::{
    CellCoord, Command, Direction, Entity, EntityIndex, Event, MazeLayout, MoveRejection, Player,
    PotionKind, TileGrid, WELCOME_BANNER,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Reasons a maze layout cannot seed a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The player start lies outside the grid.
    #[error("player starts outside the grid at {cell:?}")]
    PlayerOutOfBounds {
        /// Requested start.
        cell: CellCoord,
    },
    /// The player start is a wall.
    #[error("player starts on a wall at {cell:?}")]
    PlayerOnWall {
        /// Requested start.
        cell: CellCoord,
    },
    /// The player start already holds a crate or potion.
    #[error("player starts on an occupied cell at {cell:?}")]
    PlayerOnEntity {
        /// Requested start.
        cell: CellCoord,
    },
    /// An entity lies outside the grid.
    #[error("entity outside the grid at {cell:?}")]
    EntityOutOfBounds {
        /// Cell recorded for the entity.
        cell: CellCoord,
    },
    /// An entity sits on a wall.
    #[error("entity on a wall at {cell:?}")]
    EntityOnWall {
        /// Cell recorded for the entity.
        cell: CellCoord,
    },
    /// The entity index holds a player; the player is tracked separately.
    #[error("player registered in the entity index at {cell:?}")]
    PlayerInIndex {
        /// Cell recorded for the stray player.
        cell: CellCoord,
    },
}

/// Represents the authoritative Sokoban world state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    entities: EntityIndex,
    player: Player,
    player_position: CellCoord,
}

impl World {
    /// Creates a world from a freshly built maze layout.
    ///
    /// The player and every entity must stand on an in-bounds, non-blocking
    /// tile, and the player must not share its cell with an entity. Goal fill
    /// state is derived from the entity index so that a goal is filled exactly
    /// when a crate rests on it.
    pub fn new(layout: MazeLayout) -> Result<Self, LayoutError> {
        validate_layout(&layout)?;
        let MazeLayout {
            grid,
            entities,
            player_start,
            stats,
        } = layout;
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            entities,
            player: Player::new(stats),
            player_position: player_start,
        };
        world.sync_goal_fill();
        Ok(world)
    }

    /// Attempts to move the player using a typed move token.
    ///
    /// Returns `false` for unknown tokens and for every illegal move; the
    /// world is unchanged in that case.
    pub fn attempt_move(&mut self, token: &str) -> bool {
        let Some(direction) = Direction::from_token(token) else {
            trace!(token, reason = ?MoveRejection::UnknownDirection, "move_rejected");
            return false;
        };
        let mut events = Vec::new();
        self.resolve_move(direction, &mut events).is_ok()
    }

    /// Moves the player one cell in the provided direction.
    pub fn step(&mut self, direction: Direction) -> Result<MoveReport, MoveRejection> {
        let mut events = Vec::new();
        self.resolve_move(direction, &mut events)
    }

    /// Reports whether every crate rests on a goal.
    ///
    /// Compares the number of crates with the number of filled goals by full
    /// scan. A maze without crates is trivially won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.crate_count() == self.grid.filled_goal_count()
    }

    fn crate_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.is_crate())
            .count()
    }

    fn sync_goal_fill(&mut self) {
        let goals: Vec<CellCoord> = self
            .grid
            .iter()
            .filter(|(_, tile)| tile.is_goal())
            .map(|(cell, _)| cell)
            .collect();
        for cell in goals {
            let occupied = self.entities.get(&cell).is_some_and(Entity::is_crate);
            if let Some(tile) = self.grid.tile_mut(cell) {
                if occupied {
                    tile.fill();
                } else {
                    tile.unfill();
                }
            }
        }
    }

    fn resolve_move(
        &mut self,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<MoveReport, MoveRejection> {
        match self.plan_move(direction) {
            Ok(plan) => {
                self.commit(plan, out_events);
                Ok(plan)
            }
            Err(reason) => {
                trace!(?direction, ?reason, "move_rejected");
                out_events.push(Event::MoveRejected { direction, reason });
                Err(reason)
            }
        }
    }

    fn plan_move(&self, direction: Direction) -> Result<MoveReport, MoveRejection> {
        let from = self.player_position;
        let to = self.neighbour(from, direction)?;
        if self.is_blocking(to) {
            return Err(MoveRejection::Blocked);
        }

        let mut report = MoveReport {
            direction,
            from,
            to,
            push: None,
            potion: None,
        };

        let occupant = self.entities.get(&to);
        if let Some(strength) = occupant.and_then(Entity::crate_strength) {
            if !self.player.can_push(strength) {
                return Err(MoveRejection::CrateTooHeavy {
                    required: strength,
                    available: self.player.strength(),
                });
            }
            let destination = self
                .neighbour(to, direction)
                .map_err(|_| MoveRejection::PushOutOfBounds)?;
            if self.is_blocking(destination) {
                return Err(MoveRejection::PushBlocked);
            }
            if self.entities.contains_key(&destination) {
                return Err(MoveRejection::PushOccupied);
            }
            report.push = Some(CratePush {
                from: to,
                to: destination,
                strength,
            });
        } else {
            match occupant {
                None => {}
                Some(Entity::Potion(kind)) => report.potion = Some(*kind),
                Some(_) => return Err(MoveRejection::Blocked),
            }
        }

        Ok(report)
    }

    fn commit(&mut self, plan: MoveReport, out_events: &mut Vec<Event>) {
        if let Some(push) = plan.push {
            if let Some(crate_entity) = self.entities.remove(&push.from) {
                let _ = self.entities.insert(push.to, crate_entity);
            }
            out_events.push(Event::CratePushed {
                from: push.from,
                to: push.to,
                strength: push.strength,
            });

            if let Some(tile) = self.grid.tile_mut(push.from) {
                if tile.is_filled() {
                    tile.unfill();
                    out_events.push(Event::GoalEmptied { cell: push.from });
                }
            }
            if let Some(tile) = self.grid.tile_mut(push.to) {
                if tile.is_goal() {
                    tile.fill();
                    out_events.push(Event::GoalFilled { cell: push.to });
                }
            }
            debug!(from = ?push.from, to = ?push.to, strength = push.strength, "crate_pushed");
        }

        if let Some(potion) = plan.potion {
            let _ = self.entities.remove(&plan.to);
            self.player.apply_effect(&potion.effect());
            out_events.push(Event::PotionConsumed {
                cell: plan.to,
                potion,
            });
            debug!(
                ?potion,
                strength = self.player.strength(),
                moves = self.player.moves_remaining(),
                "potion_consumed"
            );
        }

        self.player_position = plan.to;
        self.player.add_moves(-1);
        out_events.push(Event::PlayerMoved {
            from: plan.from,
            to: plan.to,
        });
        debug!(
            direction = ?plan.direction,
            from = ?plan.from,
            to = ?plan.to,
            moves_remaining = self.player.moves_remaining(),
            "player_moved"
        );
    }

    fn neighbour(&self, cell: CellCoord, direction: Direction) -> Result<CellCoord, MoveRejection> {
        cell.offset(direction)
            .filter(|next| self.grid.contains(*next))
            .ok_or(MoveRejection::OutOfBounds)
    }

    fn is_blocking(&self, cell: CellCoord) -> bool {
        self.grid.tile(cell).map_or(true, |tile| tile.is_blocking())
    }
}

fn validate_layout(layout: &MazeLayout) -> Result<(), LayoutError> {
    let start = layout.player_start;
    match layout.grid.tile(start) {
        None => return Err(LayoutError::PlayerOutOfBounds { cell: start }),
        Some(tile) if tile.is_blocking() => return Err(LayoutError::PlayerOnWall { cell: start }),
        Some(_) => {}
    }
    if layout.entities.contains_key(&start) {
        return Err(LayoutError::PlayerOnEntity { cell: start });
    }

    for (&cell, entity) in &layout.entities {
        if matches!(entity, Entity::Player(_)) {
            return Err(LayoutError::PlayerInIndex { cell });
        }
        match layout.grid.tile(cell) {
            None => return Err(LayoutError::EntityOutOfBounds { cell }),
            Some(tile) if tile.is_blocking() => return Err(LayoutError::EntityOnWall { cell }),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Summary of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Direction the player stepped in.
    pub direction: Direction,
    /// Cell the player left.
    pub from: CellCoord,
    /// Cell the player entered.
    pub to: CellCoord,
    /// Crate relocated by the move, if any.
    pub push: Option<CratePush>,
    /// Potion consumed by the move, if any.
    pub potion: Option<PotionKind>,
}

/// Crate relocation performed as part of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CratePush {
    /// Cell the crate occupied before the push.
    pub from: CellCoord,
    /// Cell the crate occupies after the push.
    pub to: CellCoord,
    /// Strength the crate demanded.
    pub strength: u32,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move { direction } => {
            let _ = world.resolve_move(direction, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use sokoban_core::{CellCoord, EntityIndex, Player, TileGrid};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the static tile layer.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Provides read-only access to the crates and potions in the maze.
    #[must_use]
    pub fn entities(world: &World) -> &EntityIndex {
        &world.entities
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_position(world: &World) -> CellCoord {
        world.player_position
    }

    /// Current strength of the player.
    #[must_use]
    pub fn player_strength(world: &World) -> i32 {
        world.player.strength()
    }

    /// Moves left in the player's budget.
    #[must_use]
    pub fn moves_remaining(world: &World) -> i32 {
        world.player.moves_remaining()
    }

    /// Number of crates anywhere in the maze.
    #[must_use]
    pub fn crate_count(world: &World) -> usize {
        world.crate_count()
    }

    /// Number of goals currently holding a crate.
    #[must_use]
    pub fn filled_goal_count(world: &World) -> usize {
        world.grid.filled_goal_count()
    }

    /// Reports whether every crate rests on a goal.
    #[must_use]
    pub fn has_won(world: &World) -> bool {
        world.has_won()
    }

    /// Symbol shown for a cell: the player first, then any entity, then the tile.
    ///
    /// Returns `None` for cells outside the grid.
    #[must_use]
    pub fn displayed_symbol(world: &World, cell: CellCoord) -> Option<char> {
        sokoban_core::displayed_symbol(&world.grid, &world.entities, world.player_position, cell)
    }
}

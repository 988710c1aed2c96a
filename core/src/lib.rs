#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sokoban engine.
//!
//! This crate defines the static tile layer, the entities placed on top of it,
//! and the message surface that connects adapters with the authoritative world.
//! Adapters submit [`Command`] values describing desired moves, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what changed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Sokoban. Push every crate onto a goal.";

/// Cell code for a wall tile.
pub const WALL: char = 'W';
/// Cell code for a bare floor tile.
pub const FLOOR: char = ' ';
/// Cell code for an unfilled goal tile.
pub const GOAL: char = 'G';
/// Display code for a goal currently holding a crate.
pub const FILLED_GOAL: char = 'X';
/// Cell code marking the player's position.
pub const PLAYER: char = 'P';
/// Cell code for a strength potion.
pub const STRENGTH_POTION: char = 'S';
/// Cell code for a move potion.
pub const MOVE_POTION: char = 'M';
/// Cell code for a fancy potion.
pub const FANCY_POTION: char = 'F';

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player step one cell in the provided direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that a crate was pushed one cell further.
    CratePushed {
        /// Cell the crate occupied before the push.
        from: CellCoord,
        /// Cell the crate occupies after the push.
        to: CellCoord,
        /// Strength required to push the crate.
        strength: u32,
    },
    /// Announces that a goal received a crate.
    GoalFilled {
        /// Location of the goal.
        cell: CellCoord,
    },
    /// Announces that a crate was pushed off a goal.
    GoalEmptied {
        /// Location of the goal.
        cell: CellCoord,
    },
    /// Confirms that the player picked up and drank a potion.
    PotionConsumed {
        /// Cell the potion was lying on.
        cell: CellCoord,
        /// Kind of potion that was consumed.
        potion: PotionKind,
    },
    /// Reports that a move request was rejected without changing state.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The move token did not name a known direction.
    UnknownDirection,
    /// The step would leave the grid.
    OutOfBounds,
    /// The target tile is a wall.
    Blocked,
    /// The crate in the way needs more strength than the player has.
    CrateTooHeavy {
        /// Strength the crate demands.
        required: u32,
        /// Strength the player currently has.
        available: i32,
    },
    /// The crate would be pushed off the grid.
    PushOutOfBounds,
    /// The crate would be pushed into a wall.
    PushBlocked,
    /// The cell behind the crate already holds an entity.
    PushOccupied,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row and column offsets applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Parses a move token typed by the player.
    ///
    /// Accepts `w`/`a`/`s`/`d` and the spelled out direction names, ignoring
    /// case and surrounding whitespace.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Some(Self::Up),
            "s" | "down" => Some(Self::Down),
            "a" | "left" => Some(Self::Left),
            "d" | "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell, counted from the top.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the neighbouring cell in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant. The
    /// upper bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let (delta_row, delta_column) = direction.delta();
        let row = u32::try_from(i64::from(self.row) + delta_row).ok()?;
        let column = u32::try_from(i64::from(self.column) + delta_column).ok()?;
        Some(Self::new(row, column))
    }
}

/// Observable state of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Walkable floor.
    Floor,
    /// Impassable wall.
    Wall,
    /// Goal without a crate on it.
    Goal,
    /// Goal holding a crate.
    FilledGoal,
}

impl TileKind {
    /// Display code of the tile.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Floor => FLOOR,
            Self::Wall => WALL,
            Self::Goal => GOAL,
            Self::FilledGoal => FILLED_GOAL,
        }
    }
}

/// Static classification of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable floor.
    Floor,
    /// Impassable wall.
    Wall,
    /// Crate destination.
    Goal {
        /// Whether a crate currently rests on the goal.
        filled: bool,
    },
}

impl Tile {
    /// Creates an empty goal.
    #[must_use]
    pub const fn goal() -> Self {
        Self::Goal { filled: false }
    }

    /// Reports whether the tile stops the player and crates.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Observable state of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        match self {
            Self::Floor => TileKind::Floor,
            Self::Wall => TileKind::Wall,
            Self::Goal { filled: false } => TileKind::Goal,
            Self::Goal { filled: true } => TileKind::FilledGoal,
        }
    }

    /// Reports whether the tile is a goal holding a crate.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Goal { filled: true })
    }

    /// Reports whether the tile is a goal, filled or not.
    #[must_use]
    pub const fn is_goal(&self) -> bool {
        matches!(self, Self::Goal { .. })
    }

    /// Marks a goal as filled. Other tiles are left untouched.
    pub fn fill(&mut self) {
        if let Self::Goal { filled } = self {
            *filled = true;
        }
    }

    /// Marks a goal as empty. Other tiles are left untouched.
    pub fn unfill(&mut self) {
        if let Self::Goal { filled } = self {
            *filled = false;
        }
    }
}

/// Player statistic that potions can adjust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    /// Gates which crates can be pushed.
    Strength,
    /// Remaining move budget.
    Moves,
}

impl Stat {
    /// Canonical name used inside an [`Effect`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Moves => "moves",
        }
    }

    /// Resolves a stat from its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strength" => Some(Self::Strength),
            "moves" => Some(Self::Moves),
            _ => None,
        }
    }
}

/// Mapping from stat name to the signed change it applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    deltas: BTreeMap<String, i32>,
}

impl Effect {
    /// Creates an effect from `(name, delta)` pairs.
    ///
    /// Repeated names accumulate.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut deltas: BTreeMap<String, i32> = BTreeMap::new();
        for (name, delta) in pairs {
            let slot = deltas.entry(name.to_owned()).or_insert(0);
            *slot = slot.saturating_add(delta);
        }
        Self { deltas }
    }

    /// Delta recorded for the named stat, if any.
    #[must_use]
    pub fn delta(&self, name: &str) -> Option<i32> {
        self.deltas.get(name).copied()
    }

    /// Iterator over the recorded deltas ordered by stat name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.deltas.iter().map(|(name, delta)| (name.as_str(), *delta))
    }
}

/// Closed family of potions that can lie in the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PotionKind {
    /// Grants two strength.
    Strength,
    /// Grants five moves.
    Move,
    /// Grants two strength and two moves.
    Fancy,
}

impl PotionKind {
    /// Stat changes applied when the potion is consumed.
    #[must_use]
    pub fn effect(self) -> Effect {
        let strength = Stat::Strength.name();
        let moves = Stat::Moves.name();
        match self {
            Self::Strength => Effect::from_pairs([(strength, 2)]),
            Self::Move => Effect::from_pairs([(moves, 5)]),
            Self::Fancy => Effect::from_pairs([(strength, 2), (moves, 2)]),
        }
    }

    /// Cell code of the potion.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Strength => STRENGTH_POTION,
            Self::Move => MOVE_POTION,
            Self::Fancy => FANCY_POTION,
        }
    }
}

/// Initial player statistics supplied alongside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Starting strength.
    pub strength: i32,
    /// Starting move budget.
    pub moves: i32,
}

impl PlayerStats {
    /// Creates a new stat pair.
    #[must_use]
    pub const fn new(strength: i32, moves: i32) -> Self {
        Self { strength, moves }
    }
}

/// The pushing character controlled by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    strength: i32,
    moves_remaining: i32,
}

impl Player {
    /// Creates a player from its starting statistics.
    #[must_use]
    pub const fn new(stats: PlayerStats) -> Self {
        Self {
            strength: stats.strength,
            moves_remaining: stats.moves,
        }
    }

    /// Current strength.
    #[must_use]
    pub const fn strength(&self) -> i32 {
        self.strength
    }

    /// Moves left in the budget.
    #[must_use]
    pub const fn moves_remaining(&self) -> i32 {
        self.moves_remaining
    }

    /// Adjusts strength by the provided signed amount.
    pub fn add_strength(&mut self, amount: i32) {
        self.strength = self.strength.saturating_add(amount);
    }

    /// Adjusts the move budget by the provided signed amount.
    pub fn add_moves(&mut self, amount: i32) {
        self.moves_remaining = self.moves_remaining.saturating_add(amount);
    }

    /// Reports whether any moves are left.
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        self.moves_remaining > 0
    }

    /// Reports whether the player is strong enough to push a crate.
    #[must_use]
    pub fn can_push(&self, crate_strength: u32) -> bool {
        i64::from(self.strength) >= i64::from(crate_strength)
    }

    /// Applies every recognised delta of the effect. Unknown stats are skipped.
    pub fn apply_effect(&mut self, effect: &Effect) {
        for (name, delta) in effect.iter() {
            match Stat::from_name(name) {
                Some(Stat::Strength) => self.add_strength(delta),
                Some(Stat::Moves) => self.add_moves(delta),
                None => {}
            }
        }
    }
}

/// Objects that sit on top of the tile layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// Pushable crate demanding a minimum strength.
    Crate {
        /// Minimum player strength required to push the crate.
        strength: u32,
    },
    /// Consumable potion.
    Potion(PotionKind),
    /// The player character.
    Player(Player),
}

impl Entity {
    /// Reports whether the entity can move on its own.
    ///
    /// Crates only move as a consequence of a push and potions never move.
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        match self {
            Self::Crate { .. } | Self::Potion(_) => false,
            Self::Player(player) => player.is_movable(),
        }
    }

    /// Strength needed to push the entity, when it is a crate.
    #[must_use]
    pub const fn crate_strength(&self) -> Option<u32> {
        match self {
            Self::Crate { strength } => Some(*strength),
            Self::Potion(_) | Self::Player(_) => None,
        }
    }

    /// Reports whether the entity is a crate.
    #[must_use]
    pub const fn is_crate(&self) -> bool {
        matches!(self, Self::Crate { .. })
    }

    /// Effect granted on pickup, when the entity is a potion.
    #[must_use]
    pub fn effect(&self) -> Option<Effect> {
        match self {
            Self::Potion(kind) => Some(kind.effect()),
            Self::Crate { .. } | Self::Player(_) => None,
        }
    }

    /// Display code of the entity.
    ///
    /// Crates with a strength above nine are shown as `+`.
    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            Self::Crate { strength } => char::from_digit(*strength, 10).unwrap_or('+'),
            Self::Potion(kind) => kind.symbol(),
            Self::Player(_) => PLAYER,
        }
    }
}

/// Mapping from occupied cells to the entity lying there.
pub type EntityIndex = BTreeMap<CellCoord, Entity>;

/// Dense rectangular tile layer, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: u32,
    columns: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid from row-major tiles.
    ///
    /// Returns `None` when the tile count does not match the dimensions.
    #[must_use]
    pub fn from_tiles(rows: u32, columns: u32, tiles: Vec<Tile>) -> Option<Self> {
        let expected = usize::try_from(u64::from(rows) * u64::from(columns)).ok()?;
        if tiles.len() != expected {
            return None;
        }
        Some(Self {
            rows,
            columns,
            tiles,
        })
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Tile at the provided cell, if inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<&Tile> {
        self.index(cell).and_then(|index| self.tiles.get(index))
    }

    /// Mutable tile at the provided cell, if inside the grid.
    pub fn tile_mut(&mut self, cell: CellCoord) -> Option<&mut Tile> {
        self.index(cell).and_then(|index| self.tiles.get_mut(index))
    }

    /// Iterator over every cell and its tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Tile)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index / columns, index % columns), tile)
        })
    }

    /// Number of goals currently holding a crate.
    #[must_use]
    pub fn filled_goal_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_filled()).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Symbol shown for a cell: the player first, then any entity, then the tile.
///
/// Returns `None` for cells outside the grid.
#[must_use]
pub fn displayed_symbol(
    grid: &TileGrid,
    entities: &EntityIndex,
    player_position: CellCoord,
    cell: CellCoord,
) -> Option<char> {
    let tile = grid.tile(cell)?;
    if cell == player_position {
        return Some(PLAYER);
    }
    Some(
        entities
            .get(&cell)
            .map_or_else(|| tile.kind().symbol(), Entity::symbol),
    )
}

/// Result of converting a raw maze into simulation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    /// Static tile layer.
    pub grid: TileGrid,
    /// Crates and potions keyed by their cell.
    pub entities: EntityIndex,
    /// Cell the player starts on.
    pub player_start: CellCoord,
    /// Statistics the player starts with.
    pub stats: PlayerStats,
}

use sokoban_core::{CellCoord, Entity, PlayerStats, PotionKind, Tile, TileKind};
use sokoban_system_maze_builder::{build, parse_rows, BuildError};

fn rows(lines: &[&str]) -> Vec<Vec<char>> {
    lines.iter().map(|line| line.chars().collect()).collect()
}

#[test]
fn build_lays_tiles_entities_and_player_start() {
    let maze = rows(&["WWWWW", "WP1GW", "WSMFW", "WWWWW"]);
    let layout = build(&maze, PlayerStats::new(1, 10)).expect("maze builds");

    assert_eq!(layout.grid.rows(), 4);
    assert_eq!(layout.grid.columns(), 5);
    assert_eq!(layout.player_start, CellCoord::new(1, 1));
    assert_eq!(layout.stats, PlayerStats::new(1, 10));

    assert_eq!(
        layout.grid.tile(CellCoord::new(1, 3)).map(Tile::kind),
        Some(TileKind::Goal)
    );
    assert_eq!(
        layout.grid.tile(CellCoord::new(1, 2)),
        Some(&Tile::Floor),
        "crates stand on floor"
    );
    assert_eq!(
        layout.grid.tile(CellCoord::new(1, 1)),
        Some(&Tile::Floor),
        "the player stands on floor"
    );

    assert_eq!(
        layout.entities.get(&CellCoord::new(1, 2)),
        Some(&Entity::Crate { strength: 1 })
    );
    assert_eq!(
        layout.entities.get(&CellCoord::new(2, 1)),
        Some(&Entity::Potion(PotionKind::Strength))
    );
    assert_eq!(
        layout.entities.get(&CellCoord::new(2, 2)),
        Some(&Entity::Potion(PotionKind::Move))
    );
    assert_eq!(
        layout.entities.get(&CellCoord::new(2, 3)),
        Some(&Entity::Potion(PotionKind::Fancy))
    );
    assert_eq!(layout.entities.len(), 4, "player is not an indexed entity");
}

#[test]
fn unknown_symbol_names_character_and_cell() {
    let maze = rows(&["WWW", "WPW", "W?W"]);
    let error = build(&maze, PlayerStats::new(0, 0)).expect_err("unknown code");

    assert_eq!(
        error,
        BuildError::InvalidMazeSymbol {
            symbol: '?',
            cell: CellCoord::new(2, 1),
        }
    );
    assert_eq!(
        error.to_string(),
        "invalid maze symbol '?' at row 2, column 1"
    );
}

#[test]
fn filled_goal_code_is_not_accepted_as_input() {
    let maze = rows(&["PX"]);
    assert!(matches!(
        build(&maze, PlayerStats::new(0, 0)),
        Err(BuildError::InvalidMazeSymbol { symbol: 'X', .. })
    ));
}

#[test]
fn ragged_rows_are_rejected() {
    let maze = rows(&["WWW", "WP", "WWW"]);
    assert_eq!(
        build(&maze, PlayerStats::new(0, 0)),
        Err(BuildError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        })
    );
}

#[test]
fn empty_maze_is_rejected() {
    let empty: Vec<Vec<char>> = Vec::new();
    assert_eq!(
        build(&empty, PlayerStats::new(0, 0)),
        Err(BuildError::EmptyMaze)
    );
    assert_eq!(
        build(&rows(&[""]), PlayerStats::new(0, 0)),
        Err(BuildError::EmptyMaze)
    );
}

#[test]
fn player_marker_must_appear_exactly_once() {
    assert_eq!(
        build(&rows(&["W G"]), PlayerStats::new(0, 0)),
        Err(BuildError::MissingPlayer)
    );
    assert_eq!(
        build(&rows(&["P P"]), PlayerStats::new(0, 0)),
        Err(BuildError::DuplicatePlayer {
            first: CellCoord::new(0, 0),
            second: CellCoord::new(0, 2),
        })
    );
}

#[test]
fn parsed_text_builds_the_same_maze() {
    let from_text = build(&parse_rows("P1G\n"), PlayerStats::new(1, 5)).expect("text builds");
    let from_rows = build(&rows(&["P1G"]), PlayerStats::new(1, 5)).expect("rows build");
    assert_eq!(from_text, from_rows);
}

use std::{
    fs,
    io::Write,
    process::{Command, Stdio},
};

fn run_game(maze_file: &str, args: &[&str], input: &str) -> (bool, String, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("maze.txt");
    fs::write(&path, maze_file).expect("write maze file");

    let mut child = Command::new(env!("CARGO_BIN_EXE_sokoban"))
        .arg(&path)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sokoban");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("write moves");

    let output = child.wait_with_output().expect("wait for sokoban");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("utf8 stdout"),
        String::from_utf8(output.stderr).expect("utf8 stderr"),
    )
}

#[test]
fn solving_a_level_prints_the_win_message() {
    let (success, stdout, _) = run_game("1 5\nWWWWW\nWP1GW\nWWWWW\n", &[], "s\nd\n");

    assert!(success);
    assert!(stdout.starts_with("Welcome to Sokoban."));
    assert!(stdout.contains("Invalid move"), "moving into the wall is refused");
    assert!(stdout.contains("WP1GW"));
    assert!(stdout.contains("W P1W"), "the crate is drawn over its goal");
    assert!(stdout.trim_end().ends_with("You won!"));
}

#[test]
fn strength_override_unlocks_a_heavy_crate() {
    let maze = "1 5\nP2G\n";

    let (_, stdout, _) = run_game(maze, &[], "d\nq\n");
    assert!(stdout.contains("Invalid move"));

    let (success, stdout, _) = run_game(maze, &["--strength", "2"], "d\n");
    assert!(success);
    assert!(stdout.trim_end().ends_with("You won!"));
}

#[test]
fn malformed_maze_fails_with_context() {
    let (success, stdout, stderr) = run_game("1 5\nP?G\n", &[], "");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to build maze"));
    assert!(stderr.contains("invalid maze symbol '?' at row 0, column 1"));
}

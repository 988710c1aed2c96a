use std::process::{Command, Output};

fn sokoban(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sokoban"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sokoban")
}

#[test]
fn help_lists_every_option() {
    let output = sokoban(&["--help"]);
    assert!(output.status.success());

    let help = String::from_utf8(output.stdout).expect("utf8 help");
    for option in ["<MAZE>", "--strength", "--moves", "--log-filter"] {
        assert!(help.contains(option), "help is missing {option}");
    }
}

#[test]
fn missing_maze_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.txt");
    let path = path.to_str().expect("utf8 path");

    let output = sokoban(&[path]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("failed to read maze file"));
    assert!(stderr.contains("absent.txt"));
}

#[test]
fn maze_argument_is_required() {
    let output = sokoban(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

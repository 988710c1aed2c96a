#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Sokoban level in the terminal.

mod logging;
mod maze_file;
mod session;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use maze_file::MazeFile;
use session::Session;
use sokoban_core::PlayerStats;
use sokoban_rendering::TextBackend;
use sokoban_system_bootstrap::Bootstrap;
use tracing::info;

/// Push numbered crates onto goals before the move budget runs out.
#[derive(Debug, Parser)]
#[command(name = "sokoban", version, about)]
struct Args {
    /// Maze file: a `<strength> <moves>` line followed by the maze rows.
    maze: PathBuf,

    /// Overrides the starting strength from the maze file.
    #[arg(long)]
    strength: Option<i32>,

    /// Overrides the starting move budget from the maze file.
    #[arg(long)]
    moves: Option<i32>,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_filter: String,
}

/// Entry point for the Sokoban command-line interface.
fn main() -> AnyResult<()> {
    let args = Args::parse();
    logging::init(&args.log_filter);

    let text = fs::read_to_string(&args.maze)
        .with_context(|| format!("failed to read maze file {}", args.maze.display()))?;
    let maze = MazeFile::parse(&text)
        .with_context(|| format!("failed to parse maze file {}", args.maze.display()))?;
    let stats = PlayerStats::new(
        args.strength.unwrap_or(maze.stats.strength),
        args.moves.unwrap_or(maze.stats.moves),
    );

    let bootstrap = Bootstrap;
    let world = bootstrap
        .launch(&maze.rows, stats)
        .with_context(|| format!("failed to build maze {}", args.maze.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", bootstrap.welcome_banner(&world)).context("failed to write banner")?;

    let stdin = io::stdin();
    let mut session = Session::new(world, stdin.lock(), TextBackend::new(out));
    let outcome = session.run()?;
    info!(?outcome, "session_finished");
    Ok(())
}

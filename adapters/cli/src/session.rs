//! Interactive turn loop driving a single level.

use std::io::{BufRead, Write};

use anyhow::{Context, Result as AnyResult};
use sokoban_rendering::{RenderingBackend, Scene, StatsPresentation, TextBackend};
use sokoban_world::{query, World};
use tracing::debug;

/// Tokens that end the session early.
const QUIT_TOKENS: [&str; 2] = ["q", "quit"];

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Every crate reached a goal.
    Won,
    /// The move budget ran out first.
    Lost,
    /// The player quit or input ended.
    Quit,
}

/// Reads move tokens, applies them to the world and redraws after each turn.
#[derive(Debug)]
pub(crate) struct Session<R, W> {
    world: World,
    input: R,
    backend: TextBackend<W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over an already launched world.
    pub(crate) fn new(world: World, input: R, backend: TextBackend<W>) -> Self {
        Self {
            world,
            input,
            backend,
        }
    }

    /// Plays turns until the level is won, lost or abandoned.
    pub(crate) fn run(&mut self) -> AnyResult<Outcome> {
        let mut turns: u32 = 0;
        loop {
            if self.world.has_won() {
                self.display()?;
                self.say("You won!")?;
                return Ok(Outcome::Won);
            }
            if query::moves_remaining(&self.world) <= 0 {
                self.display()?;
                self.say("You lost!")?;
                return Ok(Outcome::Lost);
            }

            self.display()?;
            let Some(token) = self.prompt()? else {
                return Ok(Outcome::Quit);
            };
            if QUIT_TOKENS
                .iter()
                .any(|quit| token.eq_ignore_ascii_case(quit))
            {
                return Ok(Outcome::Quit);
            }

            turns = turns.saturating_add(1);
            if !self.world.attempt_move(&token) {
                debug!(turn = turns, token = %token, "invalid_move");
                self.say("Invalid move\n")?;
            }
        }
    }

    fn display(&mut self) -> AnyResult<()> {
        let scene = Scene::capture(
            query::tile_grid(&self.world),
            query::entities(&self.world),
            query::player_position(&self.world),
            StatsPresentation {
                moves_remaining: query::moves_remaining(&self.world),
                strength: query::player_strength(&self.world),
            },
        );
        self.backend.present(&scene)
    }

    fn prompt(&mut self) -> AnyResult<Option<String>> {
        let out = self.backend.writer();
        write!(out, "Enter move: ").context("failed to write prompt")?;
        out.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read move")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn say(&mut self, message: &str) -> AnyResult<()> {
        writeln!(self.backend.writer(), "{message}").context("failed to write message")
    }

    #[cfg(test)]
    fn into_parts(self) -> (World, W) {
        (self.world, self.backend.into_inner())
    }
}

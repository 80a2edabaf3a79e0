use std::{
    io::{self, stdout, Write},
    thread,
};

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use termion::{input::TermRead, raw::IntoRawMode};

use crate::{read_command, Board, BoardSettings, InputCmd, Screen};

/// Drives a board: applies commands, renders, and advances it once per tick.
#[derive(Debug)]
pub struct Sim {
    board: Board,
    rng: StdRng,
}

impl Sim {
    /// Seeds the random source once, from `seed` when given or from the OS otherwise.
    pub fn new(settings: &BoardSettings, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::new(settings, &mut rng);
        Self { board, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn handle(&mut self, command: InputCmd) {
        log::debug!("command {command:?}");
        match command {
            InputCmd::TogglePause => self.board.toggle_pause(),
            InputCmd::Restart => self.board.restart(&mut self.rng),
            InputCmd::Exit => self.board.terminate(),
        }
    }

    /// One round of the loop: input, render, then a step if the board is playing.
    pub fn tick<W>(&mut self, command: Option<InputCmd>, screen: &mut Screen<W>) -> io::Result<bool>
    where
        W: Write,
    {
        if let Some(command) = command {
            self.handle(command);
        }
        screen.render(&self.board)?;
        Ok(self.board.step())
    }

    /// Runs on the terminal until the board is terminated.
    pub fn run(mut self) -> anyhow::Result<()> {
        let out = stdout()
            .into_raw_mode()
            .context("failed to switch the terminal to raw mode")?;
        let mut screen = Screen::open(out, &self.board).context("failed to prepare the screen")?;
        let mut keys = termion::async_stdin().keys();

        while !self.board.is_terminated() {
            let command = match keys.next() {
                Some(key) => read_command(key.context("failed to read a key")?),
                None => None,
            };
            self.tick(command, &mut screen)
                .context("failed to draw the board")?;
            if !self.board.is_terminated() {
                thread::sleep(self.board.interval());
            }
        }

        log::info!(
            "terminated at generation {} with {} cells alive",
            self.board.generation(),
            self.board.population()
        );
        screen.close().context("failed to clear the screen")
    }
}

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use simplelog::LevelFilter;

use crate::{pos, BoardSettings, Glyphs, Pos};

#[derive(Debug, Parser)]
#[command(name = "lifeboard", about = "Conway's game of life on a fixed size board")]
pub struct Args {
    /// Screen column of the top left cell
    #[arg(short, long, default_value_t = 1)]
    pub x: u16,

    /// Screen row of the top left cell
    #[arg(short, long, default_value_t = 1)]
    pub y: u16,

    /// Number of rows, at least 5
    #[arg(short, long, default_value_t = 25)]
    pub rows: usize,

    /// Number of columns, at least 5
    #[arg(short, long, default_value_t = 25)]
    pub columns: usize,

    /// Milliseconds between two generations
    #[arg(short, long, default_value_t = 50)]
    pub interval: u64,

    /// Share of the board drawn alive when seeding
    #[arg(short, long, default_value_t = 0.5)]
    pub density: f64,

    /// Seed of the random source, taken from the OS when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = Glyphs::default().alive)]
    pub alive_glyph: char,

    #[arg(long, default_value_t = Glyphs::default().dead)]
    pub dead_glyph: char,

    /// File the log is written to
    #[arg(long, default_value = "lifeboard.log")]
    pub log_file: PathBuf,

    /// Log debug messages
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn settings(&self) -> BoardSettings {
        BoardSettings {
            origin: pos!(self.x, self.y),
            rows: self.rows,
            columns: self.columns,
            interval: Duration::from_millis(self.interval),
            density: self.density,
            glyphs: Glyphs {
                alive: self.alive_glyph,
                dead: self.dead_glyph,
            },
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

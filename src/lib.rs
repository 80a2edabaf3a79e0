pub use utils::Pos;
mod utils;

pub use world::{Board, BoardSettings, Cell, Glyphs, LifeStage, RunState};
pub mod world;

pub use sim::Sim;
mod sim;

pub use view::{paint, read_command, Canvas, InputCmd, Screen, Surface};
pub mod view;

pub use config::Args;
pub mod config;

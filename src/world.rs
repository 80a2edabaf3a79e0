#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeStage {
    #[default]
    Dead,
    Alive,
}

impl LifeStage {
    pub fn is_alive(self) -> bool {
        self == LifeStage::Alive
    }
}

/// Symbols used to paint a cell in each of its life stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: '■',
            dead: '≡',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    stage: LifeStage,
    neighbors: u8,
    glyphs: Glyphs,
}

impl Cell {
    pub fn new(row: usize, column: usize, stage: LifeStage) -> Self {
        Self {
            row,
            column,
            stage,
            neighbors: 0,
            glyphs: Glyphs::default(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn stage(&self) -> LifeStage {
        self.stage
    }

    pub fn set_stage(&mut self, stage: LifeStage) {
        self.stage = stage;
    }

    pub fn is_alive(&self) -> bool {
        self.stage.is_alive()
    }

    /// live neighbors found by the last counting pass.
    pub fn neighbors(&self) -> u8 {
        self.neighbors
    }

    pub fn set_neighbors(&mut self, neighbors: u8) {
        self.neighbors = neighbors;
    }

    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    pub fn set_glyphs(&mut self, glyphs: Glyphs) {
        self.glyphs = glyphs;
    }

    pub fn glyph(&self) -> char {
        match self.stage {
            LifeStage::Alive => self.glyphs.alive,
            LifeStage::Dead => self.glyphs.dead,
        }
    }

    /// The stage this cell takes on in the next generation given `neighbors` live neighbors.
    pub fn transition(&self, neighbors: u8) -> LifeStage {
        match (self.stage, neighbors) {
            (LifeStage::Alive, count) if count < 2 || count > 3 => LifeStage::Dead, // dies
            (LifeStage::Dead, 3) => LifeStage::Alive, // becomes alive
            (stage, _) => stage,                      // unchanged
        }
    }

    /// Applies the rule using the count stored by the last counting pass.
    pub fn advance(&mut self) {
        self.stage = self.transition(self.neighbors);
    }
}

pub use board::{Board, BoardSettings, RunState};
mod board;

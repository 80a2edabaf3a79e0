use std::io::{self, Write};

use crate::Pos;

use super::Surface;

/// A fixed size grid of characters, flushed to the terminal line by line.
#[derive(Debug, Clone)]
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: u16,
    height: u16,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let lines = (0..height).map(|_| vec![' '; width as usize]).collect();
        Self {
            height,
            lines,
            width,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        for line in self.lines.iter_mut() {
            line.fill(' ');
        }
    }

    pub fn get(&self, pos: Pos) -> Option<char> {
        self.lines
            .get(pos.y as usize)
            .and_then(|line| line.get(pos.x as usize))
            .copied()
    }

    pub fn line(&self, y: u16) -> Option<String> {
        self.lines
            .get(y as usize)
            .map(|line| line.iter().collect())
    }

    /// Writes every line at its own row, without clearing the screen first.
    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line: String = line.iter().collect();
            write!(out, "{goto}{line}")?;
        }
        out.flush()
    }
}

impl Surface for Canvas {
    fn put(&mut self, pos: Pos, glyph: char) {
        if let Some(slot) = self
            .lines
            .get_mut(pos.y as usize)
            .and_then(|line| line.get_mut(pos.x as usize))
        {
            *slot = glyph;
        }
    }
}

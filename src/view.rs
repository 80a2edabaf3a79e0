use std::io::{self, Write};

use termion::event::Key;

use crate::{pos, Board, Pos};

pub use canvas::Canvas;
mod canvas;

pub const LEGEND: &str = "[SPACEBAR] = PAUSE        [ESC] = Exit       [R] = Restart";

/// Something glyphs can be painted on.
pub trait Surface {
    fn put(&mut self, pos: Pos, glyph: char);

    fn write(&mut self, pos: Pos, text: &str) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put(pos + pos!(offset as u16, 0), glyph);
        }
    }
}

/// Screen position of a cell, cells are two columns apart.
///
/// `None` when the position does not fit on a screen.
pub fn cell_pos(origin: Pos, row: usize, column: usize) -> Option<Pos> {
    let x = u16::try_from(column.checked_mul(2)?).ok()?.checked_add(origin.x)?;
    let y = u16::try_from(row).ok()?.checked_add(origin.y)?;
    Some(pos!(x, y))
}

/// First screen row below the grid.
fn below_grid(board: &Board) -> u16 {
    cell_pos(board.origin(), board.rows(), 0).map_or(u16::MAX, |pos| pos.y)
}

/// Width and height needed to paint a board and its status lines, capped to the screen range.
pub fn frame_size(board: &Board) -> (u16, u16) {
    let grid_width = cell_pos(board.origin(), 0, board.columns()).map_or(u16::MAX, |pos| pos.x);
    let legend_width = 1 + LEGEND.chars().count() as u16;
    let height = below_grid(board).saturating_add(4);
    (grid_width.max(legend_width), height)
}

/// Paints every cell, then the generation, the run state and the key legend below the grid.
pub fn paint(board: &Board, surface: &mut impl Surface) {
    let origin = board.origin();
    for cell in board.cells() {
        if let Some(pos) = cell_pos(origin, cell.row(), cell.column()) {
            surface.put(pos, cell.glyph());
        }
    }

    let below = below_grid(board);
    let generation = format!("Generation: {}.", board.generation());
    surface.write(pos!(1, below.saturating_add(1)), &generation);
    let state = format!("Current state: {}", board.state());
    surface.write(pos!(1, below.saturating_add(2)), &state);
    surface.write(pos!(1, below.saturating_add(3)), LEGEND);
}

/// Owns the terminal output and the canvas frames are drawn on.
pub struct Screen<W>
where
    W: Write,
{
    out: W,
    canvas: Canvas,
}

impl<W> Screen<W>
where
    W: Write,
{
    pub fn open(mut out: W, board: &Board) -> io::Result<Self> {
        let (width, height) = frame_size(board);
        write!(out, "{}{}", termion::clear::All, termion::cursor::Hide)?;
        out.flush()?;
        Ok(Self {
            out,
            canvas: Canvas::new(width, height),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn render(&mut self, board: &Board) -> io::Result<()> {
        self.canvas.clear();
        paint(board, &mut self.canvas);
        self.canvas.display(&mut self.out)
    }

    pub fn close(mut self) -> io::Result<()> {
        let goto = termion::cursor::Goto(1, 1);
        write!(self.out, "{}{goto}", termion::clear::All)?;
        self.out.flush()
    }
}

impl<W> Drop for Screen<W>
where
    W: Write,
{
    fn drop(&mut self) {
        let _ = write!(self.out, "{}", termion::cursor::Show);
        let _ = self.out.flush();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    TogglePause,
    Restart,
    Exit,
}

/// Maps a key press to a command, other keys are ignored.
pub fn read_command(key: Key) -> Option<InputCmd> {
    match key {
        Key::Char(' ') => Some(InputCmd::TogglePause),
        Key::Char('r') | Key::Char('R') => Some(InputCmd::Restart),
        Key::Esc | Key::Char('q') => Some(InputCmd::Exit),
        _ => None,
    }
}

use std::{fmt, time::Duration};

use rand::Rng;

use crate::{pos, Cell, Glyphs, LifeStage, Pos};

/// Boards never get smaller than this on either side.
pub const MIN_SIDE: usize = 5;

/// Relative neighbor offsets as (row, column).
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Playing,
    Paused,
    Terminated,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Playing => write!(f, "Playing"),
            RunState::Paused => write!(f, "Paused"),
            RunState::Terminated => write!(f, "Terminated"),
        }
    }
}

/// Construction parameters of a [`Board`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    /// screen position of the top left cell.
    pub origin: Pos,
    pub rows: usize,
    pub columns: usize,
    /// delay between two ticks of the controller.
    pub interval: Duration,
    /// share of the board drawn alive when seeding.
    pub density: f64,
    pub glyphs: Glyphs,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            origin: pos!(1, 1),
            rows: MIN_SIDE,
            columns: MIN_SIDE,
            interval: Duration::from_millis(250),
            density: 0.5,
            glyphs: Glyphs::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    origin: Pos,
    rows: usize,
    columns: usize,
    interval: Duration,
    density: f64,
    generation: u64,
    state: RunState,
    cells: Vec<Cell>,
}

impl Board {
    /// Allocates a dead grid of the requested size, clamped to [`MIN_SIDE`], then seeds it.
    pub fn new<R>(settings: &BoardSettings, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let rows = settings.rows.max(MIN_SIDE);
        let columns = settings.columns.max(MIN_SIDE);
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .map(|(row, column)| {
                let mut cell = Cell::new(row, column, LifeStage::Dead);
                cell.set_glyphs(settings.glyphs);
                cell
            })
            .collect();

        let mut board = Self {
            origin: settings.origin,
            rows,
            columns,
            interval: settings.interval,
            density: settings.density.clamp(0.0, 1.0),
            generation: 0,
            state: RunState::Playing,
            cells,
        };
        board.seed_random(board.density, rng);
        board
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == RunState::Terminated
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.index(row, column).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.index(row, column).map(|index| &mut self.cells[index])
    }

    /// Cells in row major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Sets the stage of a cell, out of bounds positions are ignored.
    pub fn set(&mut self, row: usize, column: usize, stage: LifeStage) {
        if let Some(cell) = self.cell_mut(row, column) {
            cell.set_stage(stage);
        }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then_some(row * self.columns + column)
    }

    /// Marks `rows * columns * density` randomly drawn cells alive.
    ///
    /// Draws are made with replacement, and only over `[0, rows - 1)` x `[0, columns - 1)`:
    /// the last row and column are never seeded.
    pub fn seed_random<R>(&mut self, density: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let draws = (self.cells.len() as f64 * density.clamp(0.0, 1.0)) as usize;
        for _ in 0..draws {
            let row = rng.gen_range(0..self.rows - 1);
            let column = rng.gen_range(0..self.columns - 1);
            self.set(row, column, LifeStage::Alive);
        }
        log::debug!("seeded {draws} draws, {} cells alive", self.population());
    }

    /// Counts the live neighbors of a cell.
    ///
    /// A neighbor on the following row (or column) is only scanned while it sits before the
    /// last row (or column), so the last row and column never count towards their upper and
    /// left neighbors, and cells on them never see past themselves.
    ///
    /// # Panics
    /// if the position is outside of the board.
    pub fn count_neighbors(&self, row: usize, column: usize) -> u8 {
        assert!(
            row < self.rows && column < self.columns,
            "({row}, {column}) is outside of a {}x{} board",
            self.rows,
            self.columns
        );
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(row_offset, column_offset)| {
                let row = scan_index(row, row_offset, self.rows)?;
                let column = scan_index(column, column_offset, self.columns)?;
                Some(row * self.columns + column)
            })
            .filter(|&index| self.cells[index].is_alive())
            .count() as u8
    }

    /// Advances one generation while playing, returns whether it did.
    pub fn step(&mut self) -> bool {
        if self.state != RunState::Playing {
            return false;
        }

        for index in 0..self.cells.len() {
            let count = self.count_neighbors(index / self.columns, index % self.columns);
            self.cells[index].set_neighbors(count);
        }
        for cell in self.cells.iter_mut() {
            cell.advance();
        }

        self.generation += 1;
        log::trace!(
            "generation {} with {} cells alive",
            self.generation,
            self.population()
        );
        true
    }

    /// Kills every cell, reseeds, and waits paused at generation 0.
    pub fn restart<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if self.is_terminated() {
            return;
        }
        for cell in self.cells.iter_mut() {
            cell.set_stage(LifeStage::Dead);
        }
        self.seed_random(self.density, rng);
        self.generation = 0;
        self.set_state(RunState::Paused);
        log::info!("board restarted with {} cells alive", self.population());
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Playing {
            self.set_state(RunState::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.set_state(RunState::Playing);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            RunState::Playing => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Terminated => (),
        }
    }

    /// Terminated is final, nothing moves the board out of it.
    pub fn terminate(&mut self) {
        self.set_state(RunState::Terminated);
    }

    fn set_state(&mut self, state: RunState) {
        if self.state != state {
            log::debug!("board {} -> {}", self.state, state);
            self.state = state;
        }
    }
}

fn scan_index(index: usize, offset: isize, len: usize) -> Option<usize> {
    match offset {
        -1 => index.checked_sub(1),
        1 => (index + 1 < len - 1).then_some(index + 1),
        _ => Some(index),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use super::*;

    /// Always yields zero and counts how often it was asked.
    #[derive(Debug, Default)]
    struct DrawCounter {
        calls: usize,
    }

    impl RngCore for DrawCounter {
        fn next_u32(&mut self) -> u32 {
            self.calls += 1;
            0
        }

        fn next_u64(&mut self) -> u64 {
            self.calls += 1;
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.calls += 1;
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn empty_board(rows: usize, columns: usize) -> Board {
        let settings = BoardSettings {
            rows,
            columns,
            density: 0.0,
            ..Default::default()
        };
        Board::new(&settings, &mut rng())
    }

    fn with_alive(mut board: Board, alive: &[(usize, usize)]) -> Board {
        for &(row, column) in alive {
            board.set(row, column, LifeStage::Alive);
        }
        board
    }

    fn neighborhood(row: usize, column: usize) -> Vec<(usize, usize)> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(r, c)| {
                (
                    (row as isize + r) as usize,
                    (column as isize + c) as usize,
                )
            })
            .collect()
    }

    fn alive_positions(board: &Board) -> Vec<(usize, usize)> {
        board
            .cells()
            .filter(|cell| cell.is_alive())
            .map(|cell| (cell.row(), cell.column()))
            .collect()
    }

    #[test]
    fn clamps_small_dimensions() {
        let board = empty_board(2, 0);
        assert_eq!((board.rows(), board.columns()), (5, 5));
        assert_eq!(board.cells().count(), 25);

        let board = empty_board(8, 12);
        assert_eq!((board.rows(), board.columns()), (8, 12));
        let last = board.cells().last().unwrap();
        assert_eq!((last.row(), last.column()), (7, 11));
    }

    #[test]
    fn starts_playing_at_generation_zero() {
        let board = Board::new(&BoardSettings::default(), &mut rng());
        assert_eq!(board.state(), RunState::Playing);
        assert_eq!(board.generation(), 0);
        assert_eq!(board.origin(), pos!(1, 1));
        assert_eq!(board.interval(), Duration::from_millis(250));
    }

    #[test]
    fn empty_board_has_no_neighbors() {
        let board = empty_board(5, 5);
        for row in 0..5 {
            for column in 0..5 {
                assert_eq!(board.count_neighbors(row, column), 0);
            }
        }
    }

    #[test]
    fn interior_cell_sees_full_neighborhood() {
        let board = with_alive(empty_board(5, 5), &neighborhood(2, 2));
        assert_eq!(board.count_neighbors(2, 2), 8);
    }

    #[test]
    fn last_row_and_column_are_not_scanned() {
        let board = with_alive(empty_board(5, 5), &neighborhood(3, 3));
        // only the upper left, upper and left neighbors
        assert_eq!(board.count_neighbors(3, 3), 3);

        let board = with_alive(empty_board(5, 5), &neighborhood(2, 3));
        assert_eq!(board.count_neighbors(2, 3), 5);

        let board = with_alive(empty_board(5, 5), &neighborhood(3, 2));
        assert_eq!(board.count_neighbors(3, 2), 5);

        let board = with_alive(empty_board(5, 5), &[(4, 2)]);
        assert_eq!(board.count_neighbors(3, 2), 0);
        assert_eq!(board.count_neighbors(4, 1), 1);
        assert_eq!(board.count_neighbors(4, 3), 1);

        // the right neighbor sits on the last column
        let board = with_alive(empty_board(5, 5), &[(4, 4)]);
        assert_eq!(board.count_neighbors(4, 3), 0);
        assert_eq!(board.count_neighbors(3, 3), 0);
    }

    #[test]
    fn corner_is_clipped() {
        let board = with_alive(empty_board(5, 5), &[(0, 1), (1, 0), (1, 1)]);
        assert_eq!(board.count_neighbors(0, 0), 3);
    }

    #[test]
    fn step_counts_one_generation() {
        let mut board = empty_board(5, 5);
        assert!(board.step());
        assert_eq!(board.generation(), 1);

        let mut board = Board::new(&BoardSettings::default(), &mut rng());
        for expected in 1..=10 {
            assert!(board.step());
            assert_eq!(board.generation(), expected);
        }
    }

    #[test]
    fn lone_cell_dies() {
        let mut board = with_alive(empty_board(5, 5), &[(2, 2)]);
        board.step();
        assert_eq!(board.population(), 0);
        assert_eq!(board.cell(2, 2).unwrap().neighbors(), 0);
        assert_eq!(board.cell(1, 1).unwrap().neighbors(), 1);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = vec![(1, 1), (1, 2), (1, 3)];
        let vertical = vec![(0, 2), (1, 2), (2, 2)];
        let mut board = with_alive(empty_board(5, 5), &horizontal);

        board.step();
        assert_eq!(alive_positions(&board), vertical);
        assert_eq!(board.cell(2, 2).unwrap().neighbors(), 3);

        board.step();
        assert_eq!(alive_positions(&board), horizontal);
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn paused_board_does_not_step() {
        let mut board = with_alive(empty_board(5, 5), &[(1, 1), (1, 2), (1, 3)]);
        board.pause();
        assert_eq!(board.state(), RunState::Paused);
        assert!(!board.step());
        assert_eq!(board.generation(), 0);
        assert_eq!(alive_positions(&board), vec![(1, 1), (1, 2), (1, 3)]);

        board.resume();
        assert!(board.step());
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn toggle_pause_flips_between_playing_and_paused() {
        let mut board = empty_board(5, 5);
        board.toggle_pause();
        assert_eq!(board.state(), RunState::Paused);
        board.toggle_pause();
        assert_eq!(board.state(), RunState::Playing);
    }

    #[test]
    fn terminated_is_absorbing() {
        let mut rng = rng();
        let mut board = with_alive(empty_board(5, 5), &[(2, 2)]);
        board.step();
        board.terminate();

        board.resume();
        board.toggle_pause();
        board.pause();
        board.restart(&mut rng);
        assert_eq!(board.state(), RunState::Terminated);
        assert_eq!(board.generation(), 1);
        assert!(!board.step());
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn restart_resets_generation_and_pauses() {
        let mut rng = rng();
        let mut board = Board::new(&BoardSettings::default(), &mut rng);
        board.step();
        board.step();
        board.restart(&mut rng);
        assert_eq!(board.generation(), 0);
        assert_eq!(board.state(), RunState::Paused);

        board.resume();
        board.step();
        board.pause();
        board.restart(&mut rng);
        assert_eq!(board.generation(), 0);
        assert_eq!(board.state(), RunState::Paused);
    }

    #[test]
    fn restart_clears_before_reseeding() {
        let settings = BoardSettings {
            density: 0.0,
            ..Default::default()
        };
        let mut rng = rng();
        let mut board = Board::new(&settings, &mut rng);
        board.set(4, 4, LifeStage::Alive);
        board.restart(&mut rng);
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn seeding_skips_last_row_and_column() {
        let settings = BoardSettings {
            rows: 10,
            columns: 10,
            density: 1.0,
            ..Default::default()
        };
        let board = Board::new(&settings, &mut rng());
        let population = board.population();
        assert!(population > 0);
        assert!(population <= 100);
        assert!(board
            .cells()
            .filter(|cell| cell.row() == 9 || cell.column() == 9)
            .all(|cell| !cell.is_alive()));
    }

    #[test]
    fn seeding_draws_density_share_of_the_board() {
        let mut counter = DrawCounter::default();
        let board = Board::new(&BoardSettings::default(), &mut counter);
        // a row and a column per draw, 25 / 2 draws
        assert_eq!(counter.calls, 24);
        assert_eq!(board.population(), 1);
        assert!(board.cell(0, 0).unwrap().is_alive());

        let settings = BoardSettings {
            rows: 10,
            columns: 10,
            density: 0.3,
            ..Default::default()
        };
        let mut counter = DrawCounter::default();
        Board::new(&settings, &mut counter);
        assert_eq!(counter.calls, 60);

        let settings = BoardSettings {
            rows: 7,
            columns: 6,
            density: 1.0,
            ..Default::default()
        };
        let mut counter = DrawCounter::default();
        let mut board = Board::new(&settings, &mut counter);
        assert_eq!(counter.calls, 84);

        counter.calls = 0;
        board.restart(&mut counter);
        assert_eq!(counter.calls, 84);
    }

    #[test]
    fn same_seed_same_board() {
        let settings = BoardSettings {
            rows: 20,
            columns: 30,
            ..Default::default()
        };
        let a = Board::new(&settings, &mut StdRng::seed_from_u64(42));
        let b = Board::new(&settings, &mut StdRng::seed_from_u64(42));
        assert_eq!(alive_positions(&a), alive_positions(&b));
    }

    #[test]
    fn settings_glyphs_apply_to_every_cell() {
        let glyphs = Glyphs {
            alive: 'o',
            dead: ' ',
        };
        let settings = BoardSettings {
            glyphs,
            ..Default::default()
        };
        let board = Board::new(&settings, &mut rng());
        assert!(board.cells().all(|cell| cell.glyphs() == glyphs));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut board = empty_board(5, 5);
        board.set(5, 0, LifeStage::Alive);
        board.set(0, 5, LifeStage::Alive);
        assert_eq!(board.population(), 0);
        assert!(board.cell(5, 5).is_none());
    }
}

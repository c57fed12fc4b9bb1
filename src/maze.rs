//! Maze data model.
//!
//! This module contains the grid of cells that make up a level, the player's position within it
//! and the per-session [`GameState`] that owns both along with the timing information of the run.

use std::time::{Duration, Instant};

/// Largest number of rows a level may declare.
pub const MAX_ROWS: usize = 60;

/// Largest number of columns a level may declare.
pub const MAX_COLS: usize = 60;

/// Semantic content of a single grid cell.
///
/// The player is modeled as overwriting whatever cell it stands on. The terrain underneath is not
/// remembered, so a cell the player leaves always becomes [`Cell::OpenPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable wall, written `#` in level files.
    Wall,
    /// Walkable floor, written as a space in level files.
    OpenPath,
    /// Goal cell, written `E` in level files. Stepping onto it wins the game.
    Exit,
    /// Cell currently occupied by the player, written `P` in level files.
    Player,
}

impl Cell {
    /// Decodes a level-file symbol into a cell, returning `None` for unknown symbols.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Wall),
            ' ' => Some(Self::OpenPath),
            'E' => Some(Self::Exit),
            'P' => Some(Self::Player),
            _ => None,
        }
    }

    /// Returns the level-file symbol for this cell.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::OpenPath => ' ',
            Self::Exit => 'E',
            Self::Player => 'P',
        }
    }
}

/// Zero-indexed `(row, column)` coordinate into a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major grid of cells sized exactly to the level's dimensions.
///
/// Every access goes through [`Grid::get`] and [`Grid::set`], which check the position against the
/// active dimensions instead of indexing blindly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows in the grid.
    rows: usize,
    /// Number of columns in the grid.
    cols: usize,
    /// Cells stored row after row; always `rows * cols` long.
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from its dimensions and row-major cells.
    ///
    /// Returns `None` when the number of cells does not match `rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Option<Self> {
        (rows.checked_mul(cols) == Some(cells.len())).then_some(Self { rows, cols, cells })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the position lies inside `[0, rows) × [0, cols)`.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Returns the cell at `position`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Overwrites the cell at `position`.
    ///
    /// Returns `false`, leaving the grid untouched, when the position lies outside the grid.
    pub fn set(&mut self, position: Position, cell: Cell) -> bool {
        match self
            .index(position)
            .and_then(|index| self.cells.get_mut(index))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Counts the cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&current| current == cell).count()
    }

    /// Maps a position to its offset in the backing vector.
    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row * self.cols + position.col)
    }
}

/// Progress of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The player is still looking for the exit.
    Active,
    /// The player has reached the exit. No more moves are applied.
    Won,
}

/// Complete state of one play session.
///
/// It is created by the level loader, mutated in place by
/// [`apply_move`](crate::movement::apply_move) and dropped once the session ends.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Cells of the level, including the player marker.
    grid: Grid,
    /// Current player coordinates.
    player: Position,
    /// Whether the exit has been reached.
    status: Status,
    /// Moment the session started, set by the caller right after loading.
    started_at: Option<Instant>,
    /// Moment the session ended, unset until it does.
    finished_at: Option<Instant>,
}

impl GameState {
    /// Builds an active, untimed session from a grid and the player's position.
    ///
    /// Returns `None` unless `player` lies inside the grid on a [`Cell::Player`] and that cell is
    /// the only player marker in the grid.
    #[must_use]
    pub fn new(grid: Grid, player: Position) -> Option<Self> {
        if grid.get(player) != Some(Cell::Player) || grid.count(Cell::Player) != 1 {
            return None;
        }

        Some(Self {
            grid,
            player,
            status: Status::Active,
            started_at: None,
            finished_at: None,
        })
    }

    /// The level grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid, for the movement engine.
    pub(crate) const fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current player coordinates.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Updates the player coordinates without touching the grid.
    pub(crate) const fn set_player(&mut self, player: Position) {
        self.player = player;
    }

    /// Number of rows in the level.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns in the level.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Current progress of the session.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns whether the exit has been reached.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    /// Marks the session as won.
    pub(crate) const fn win(&mut self) {
        self.status = Status::Won;
    }

    /// Records the start of the session.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.finished_at = None;
    }

    /// Records the end of the session. Only the first call has an effect.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }

    /// Moment the session started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Moment the session ended, if it has.
    #[must_use]
    pub const fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    /// Time between start and finish.
    ///
    /// Returns `None` until both timestamps are recorded.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.finished_at?.saturating_duration_since(self.started_at?))
    }
}

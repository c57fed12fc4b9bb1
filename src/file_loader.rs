//! Level file loading and validation.
//!
//! A level file starts with a header line holding two positive integers, `rows cols`, followed by
//! exactly `rows` lines of `cols` symbols each: `#` for walls, a space for open path, `E` for the
//! exit and `P` for the player's starting cell.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    config::Level,
    maze::{Cell, GameState, Grid, Position, MAX_COLS, MAX_ROWS},
};

/// Reasons a level source can fail to load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The level source could not be opened or read.
    #[error("failed to read level file `{}`", .path.display())]
    NotFound {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level source was read but its content is invalid.
    #[error("malformed level: {0}")]
    Malformed(#[from] Malformation),
}

/// Specific ways a level's content can be invalid.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Malformation {
    /// The header line with the dimensions is missing or incomplete.
    #[error("missing `rows cols` header")]
    MissingDimensions,
    /// A dimension in the header is not a number.
    #[error("dimension `{0}` is not a positive integer")]
    InvalidDimension(String),
    /// The dimensions are zero or exceed the supported maximum.
    #[error(
        "dimensions {rows}x{cols} outside 1x1..={max_rows}x{max_cols}",
        max_rows = MAX_ROWS,
        max_cols = MAX_COLS
    )]
    DimensionsOutOfRange {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
    },
    /// The source ends before all declared rows were read.
    #[error("row {0} is missing")]
    MissingRow(usize),
    /// A row does not hold exactly the declared number of symbols.
    #[error("row {row} has {found} symbols, expected {expected}")]
    RowLength {
        /// Zero-indexed row.
        row: usize,
        /// Declared number of columns.
        expected: usize,
        /// Symbols actually present.
        found: usize,
    },
    /// A symbol other than `#`, ` `, `E` or `P` was found.
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// Zero-indexed row.
        row: usize,
        /// Zero-indexed column.
        col: usize,
        /// Offending symbol.
        symbol: char,
    },
    /// No `P` marker was found.
    #[error("no player start position")]
    MissingPlayer,
    /// The level file is not valid UTF-8 text.
    #[error("level is not valid UTF-8 text")]
    InvalidEncoding,
}

/// Builds the conventional path of a level file inside `dir`.
#[must_use]
pub fn level_path(dir: &Path, level: Level) -> PathBuf {
    dir.join(format!("level{}_maze.txt", level.number()))
}

/// Reads and parses the level file at `path`.
///
/// The returned state is untimed; callers record the start time right after a successful load.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if the file cannot be opened or read.
/// - [`LoadError::Malformed`] if its content is not UTF-8 or is invalid, see [`parse_level`].
pub fn load_level(path: &Path) -> Result<GameState, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData => LoadError::Malformed(Malformation::InvalidEncoding),
        _ => LoadError::NotFound {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let state = parse_level(&source)?;
    tracing::info!(
        path = %path.display(),
        rows = state.rows(),
        cols = state.cols(),
        player_row = state.player().row,
        player_col = state.player().col,
        "level loaded"
    );

    Ok(state)
}

/// Parses level text into a fresh [`GameState`].
///
/// Lines may end in `\n` or `\r\n`. Grid rows are taken verbatim, so trailing spaces count as open
/// path. Anything after the last declared row is ignored. When several `P` markers are present the
/// last one scanned becomes the player and the others are loaded as open path.
///
/// # Errors
///
/// Returns [`LoadError::Malformed`] when the header is missing, not numeric or out of range, when a
/// row is missing, has the wrong length or holds an unknown symbol, and when there is no player.
pub fn parse_level(source: &str) -> Result<GameState, LoadError> {
    let mut lines = source.lines();
    let (rows, cols) = parse_dimensions(lines.next())?;

    let mut cells = Vec::with_capacity(rows * cols);
    let mut player = None;

    for row in 0..rows {
        let line = lines.next().ok_or(Malformation::MissingRow(row))?;

        let found = line.chars().count();
        if found != cols {
            return Err(Malformation::RowLength {
                row,
                expected: cols,
                found,
            }
            .into());
        }

        for (col, symbol) in line.chars().enumerate() {
            let cell = Cell::from_symbol(symbol)
                .ok_or(Malformation::UnknownSymbol { row, col, symbol })?;
            if cell == Cell::Player {
                if let Some(previous) = player.replace(Position::new(row, col)) {
                    tracing::warn!(?previous, "level holds more than one player marker");
                    if let Some(slot) = cells.get_mut(previous.row * cols + previous.col) {
                        *slot = Cell::OpenPath;
                    }
                }
            }
            cells.push(cell);
        }
    }

    let player = player.ok_or(Malformation::MissingPlayer)?;
    let grid = Grid::new(rows, cols, cells).ok_or(Malformation::MissingRow(rows))?;

    GameState::new(grid, player).ok_or_else(|| Malformation::MissingPlayer.into())
}

/// Parses and validates the `rows cols` header line.
fn parse_dimensions(header: Option<&str>) -> Result<(usize, usize), Malformation> {
    let mut fields = header
        .ok_or(Malformation::MissingDimensions)?
        .split_whitespace();

    let mut next_dimension = || -> Result<usize, Malformation> {
        let field = fields.next().ok_or(Malformation::MissingDimensions)?;
        field
            .parse()
            .map_err(|_err| Malformation::InvalidDimension(field.to_owned()))
    };
    let rows = next_dimension()?;
    let cols = next_dimension()?;

    if !(1..=MAX_ROWS).contains(&rows) || !(1..=MAX_COLS).contains(&cols) {
        return Err(Malformation::DimensionsOutOfRange { rows, cols });
    }

    Ok((rows, cols))
}

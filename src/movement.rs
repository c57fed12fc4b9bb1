//! Movement rules of the game.
//!
//! Each request moves the player by one cell. The move is either applied in full or rejected
//! without touching the state.

use crate::maze::{Cell, GameState, Position};

/// One of the four directions the player can move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in no particular order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the neighbour of `position` in this direction.
    ///
    /// Returns `None` when the neighbour would have a negative coordinate. The upper bounds are
    /// checked against the grid by the caller.
    #[must_use]
    pub fn step(self, position: Position) -> Option<Position> {
        let Position { row, col } = position;
        Some(match self {
            Self::Up => Position::new(row.checked_sub(1)?, col),
            Self::Down => Position::new(row.checked_add(1)?, col),
            Self::Left => Position::new(row, col.checked_sub(1)?),
            Self::Right => Position::new(row, col.checked_add(1)?),
        })
    }
}

/// Outcome of a move request.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The target is a wall or off the grid. Nothing changed.
    Blocked,
    /// The player now stands on the target cell.
    Moved,
    /// The target is an exit. The session is over.
    Won,
}

/// Applies one move to the session.
///
/// The target cell is the player's neighbour in `direction`:
///
/// - off the grid or a wall: [`MoveResult::Blocked`], nothing changes;
/// - an exit: [`MoveResult::Won`], the status becomes won but the grid and the player position are
///   left as they were, so the final frame shows the player next to the exit;
/// - open path: [`MoveResult::Moved`], the vacated cell becomes open path whatever it held before
///   and the target holds the player.
///
/// Once the session is won every further call is a no-op that returns [`MoveResult::Won`].
/// Timestamps are not touched; the caller records the end time when the game is won.
pub fn apply_move(state: &mut GameState, direction: Direction) -> MoveResult {
    if state.is_won() {
        tracing::debug!(?direction, "move ignored, the session is already won");
        return MoveResult::Won;
    }

    let current = state.player();
    let Some((target, cell)) = direction
        .step(current)
        .and_then(|target| Some((target, state.grid().get(target)?)))
    else {
        tracing::debug!(?direction, ?current, "move blocked by the edge of the maze");
        return MoveResult::Blocked;
    };

    match cell {
        // A validated state holds a single player marker, so a neighbouring one is never walkable.
        Cell::Wall | Cell::Player => {
            tracing::debug!(?direction, ?target, ?cell, "move blocked");
            MoveResult::Blocked
        }
        Cell::Exit => {
            state.win();
            tracing::info!(?target, "exit reached");
            MoveResult::Won
        }
        Cell::OpenPath => {
            let grid = state.grid_mut();
            let _ = grid.set(current, Cell::OpenPath);
            let _ = grid.set(target, Cell::Player);
            state.set_player(target);
            tracing::debug!(?direction, ?target, "player moved");
            MoveResult::Moved
        }
    }
}

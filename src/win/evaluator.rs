//! Win-condition evaluation.
//!
//! Checks run in a fixed priority order, stopping at the first success:
//! rows top to bottom, then columns left to right, then the full board.
//! Only conditions enabled in `WinConditions` are checked. A cell counts
//! toward a line only when it is non-empty, claimed, and at the approval
//! threshold.
//!
//! The priority order doubles as the tie-break: a board that completes a
//! row and the full board simultaneously reports the row win.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::claims::TileBoard;
use crate::core::{PlayerId, WinConditions};

/// The line that satisfied a win condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinningLine {
    /// A complete row (0-based index).
    Row(usize),
    /// A complete column (0-based index).
    Column(usize),
    /// Every tile on the board.
    FullBoard,
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinningLine::Row(r) => write!(f, "Row {} Complete!", r + 1),
            WinningLine::Column(c) => write!(f, "Column {} Complete!", c + 1),
            WinningLine::FullBoard => write!(f, "Full Board Complete!"),
        }
    }
}

/// Terminal outcome of a session. Set at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// The condition that fired.
    pub line: WinningLine,
    /// The player whose board satisfied it.
    pub winner: PlayerId,
}

fn cell_complete(board: &Board, tiles: &TileBoard, index: usize, required: usize) -> bool {
    board.cell(index).is_some()
        && tiles
            .get(index)
            .is_some_and(|tile| tile.is_approved(required))
}

/// Evaluate one player's board against the enabled win conditions.
///
/// `required_approvals` is the threshold at evaluation time (computed from
/// the current roster size, so late joiners raise the bar for everyone).
/// Returns `None` while no condition is satisfied.
#[must_use]
pub fn evaluate(
    board: &Board,
    tiles: &TileBoard,
    conditions: &WinConditions,
    required_approvals: usize,
) -> Option<WinningLine> {
    if conditions.by_row {
        for row in 0..board.rows() {
            let line: SmallVec<[usize; 8]> = board.row_indices(row).collect();
            if line
                .iter()
                .all(|&i| cell_complete(board, tiles, i, required_approvals))
            {
                return Some(WinningLine::Row(row));
            }
        }
    }

    if conditions.by_column {
        for column in 0..board.columns() {
            let line: SmallVec<[usize; 8]> = board.column_indices(column).collect();
            if line
                .iter()
                .all(|&i| cell_complete(board, tiles, i, required_approvals))
            {
                return Some(WinningLine::Column(column));
            }
        }
    }

    if conditions.by_all
        && (0..board.len()).all(|i| cell_complete(board, tiles, i, required_approvals))
    {
        return Some(WinningLine::FullBoard);
    }

    None
}

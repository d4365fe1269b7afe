//! Deterministic per-user board generation.
//!
//! ## Algorithm
//!
//! 1. Filter the pool to items not hidden from the user.
//! 2. Derive a per-user RNG from `(session seed, username)`.
//! 3. Seeded Fisher-Yates shuffle of the visible items.
//! 4. Fill cells left-to-right, row-major; pad with `None` when the visible
//!    pool is smaller than the grid.
//!
//! An item appears at most once on a board. The same inputs reproduce the
//! same board; the session stores each generated board and never calls this
//! again for that user.

use crate::core::BoardRng;
use crate::items::{ItemId, ItemRegistry};

use super::grid::Board;

/// Generate `username`'s board from the item pool.
#[must_use]
pub fn generate_board(
    username: &str,
    pool: &ItemRegistry,
    rows: usize,
    columns: usize,
    session_seed: u64,
) -> Board {
    let mut visible: Vec<ItemId> = pool
        .iter()
        .filter(|item| !item.is_hidden_from(username))
        .map(|item| item.id)
        .collect();

    let mut rng = BoardRng::for_user(session_seed, username);
    rng.shuffle(&mut visible);

    let total = rows * columns;
    let mut cells: Vec<Option<ItemId>> = visible.into_iter().take(total).map(Some).collect();
    cells.resize(total, None);

    Board::from_cells(rows, columns, cells)
}

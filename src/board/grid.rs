//! Board grid: one player's personalized tile layout.
//!
//! A board is a row-major sequence of `rows x columns` cells, each holding an
//! item reference or nothing (when the visible pool was smaller than the
//! grid). Boards are generated once at session start and cached; they are
//! never regenerated for a user within a session.

use serde::{Deserialize, Serialize};

use crate::items::ItemId;

/// One player's grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Option<ItemId>>,
}

impl Board {
    /// Build a board from row-major cells.
    ///
    /// Panics unless `cells.len() == rows * columns`.
    #[must_use]
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Option<ItemId>>) -> Self {
        assert_eq!(
            cells.len(),
            rows * columns,
            "Board cell count must equal rows * columns"
        );
        Self { rows, columns, cells }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total cell count (`rows * columns`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-cell board (never produced by the generator).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The item at a flat cell index, or `None` for padding or out of range.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<ItemId> {
        self.cells.get(index).copied().flatten()
    }

    /// The item at `(row, column)`.
    #[must_use]
    pub fn at(&self, row: usize, column: usize) -> Option<ItemId> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cell(row * self.columns + column)
    }

    /// Whether a flat index addresses a cell on this board.
    #[must_use]
    pub fn in_bounds(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Option<ItemId>> + '_ {
        self.cells.iter().copied()
    }

    /// Flat indices of the cells in one row.
    pub fn row_indices(&self, row: usize) -> impl Iterator<Item = usize> {
        let start = row * self.columns;
        start..start + self.columns
    }

    /// Flat indices of the cells in one column.
    pub fn column_indices(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).map(move |r| r * self.columns + column)
    }
}

//! Session configuration.
//!
//! A session is configured once at creation: grid dimensions, which win
//! conditions are enabled, and the seed that board shuffles derive from.
//! All of this is immutable after `GameSession::new`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a game session.
///
/// Sessions are fully isolated from one another; the ID is also the
/// persistence key prefix for per-user snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a new session ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Which win conditions end the session.
///
/// Evaluation order is fixed (rows, then columns, then full board)
/// regardless of which flags are set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinConditions {
    /// A fully approved row wins.
    pub by_row: bool,
    /// A fully approved column wins.
    pub by_column: bool,
    /// Every tile approved wins.
    pub by_all: bool,
}

impl WinConditions {
    /// Only rows win.
    #[must_use]
    pub const fn rows_only() -> Self {
        Self { by_row: true, by_column: false, by_all: false }
    }

    /// Rows, columns, and full board all win.
    #[must_use]
    pub const fn any_line() -> Self {
        Self { by_row: true, by_column: true, by_all: true }
    }

    /// True when no condition is enabled (the session could never end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.by_row && !self.by_column && !self.by_all
    }
}

impl Default for WinConditions {
    fn default() -> Self {
        Self::any_line()
    }
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use bingo_engine::core::{SessionConfig, WinConditions};
///
/// let config = SessionConfig::new(4, 3)
///     .with_win_conditions(WinConditions::rows_only())
///     .with_seed(42);
///
/// assert_eq!(config.total_tiles(), 12);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Board rows per player.
    pub rows: usize,

    /// Board columns per player.
    pub columns: usize,

    /// Enabled win conditions.
    pub win_conditions: WinConditions,

    /// Seed that per-user board shuffles derive from.
    ///
    /// Pinning this (rather than mixing in wall-clock time) keeps board
    /// generation reproducible for a given session.
    pub seed: u64,
}

impl SessionConfig {
    /// Create a configuration for a `rows x columns` grid.
    ///
    /// Defaults: all win conditions enabled, seed 0.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0, "Board must have at least 1 row");
        assert!(columns > 0, "Board must have at least 1 column");

        Self {
            rows,
            columns,
            win_conditions: WinConditions::default(),
            seed: 0,
        }
    }

    /// Set the enabled win conditions.
    #[must_use]
    pub fn with_win_conditions(mut self, win: WinConditions) -> Self {
        self.win_conditions = win;
        self
    }

    /// Set the board shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cells per board.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.rows * self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id() {
        let id = SessionId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Session(5)");
    }

    #[test]
    fn test_win_conditions() {
        let rows = WinConditions::rows_only();
        assert!(rows.by_row);
        assert!(!rows.by_column);
        assert!(!rows.by_all);
        assert!(!rows.is_empty());

        let none = WinConditions { by_row: false, by_column: false, by_all: false };
        assert!(none.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = SessionConfig::new(5, 5)
            .with_win_conditions(WinConditions::rows_only())
            .with_seed(99);

        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 5);
        assert_eq!(config.total_tiles(), 25);
        assert_eq!(config.seed, 99);
        assert_eq!(config.win_conditions, WinConditions::rows_only());
    }

    #[test]
    #[should_panic(expected = "at least 1 row")]
    fn test_zero_rows_panics() {
        let _ = SessionConfig::new(0, 3);
    }
}

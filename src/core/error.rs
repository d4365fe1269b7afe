//! Engine error taxonomy.
//!
//! Every fallible operation returns `EngineResult`. Errors are transactional:
//! an `Err` return means no state was mutated. None of these are fatal to a
//! session; callers treat `TileLocked` and `NotFound` as recoverable no-ops.

use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before any mutation (empty text, bad configuration,
    /// operation out of phase).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The acting player lacks the required role.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// The item pool is below the minimum required to start the session.
    #[error("not enough items to start: have {have}, need {needed}")]
    InsufficientItems {
        /// Items currently in the pool.
        have: usize,
        /// Minimum pool size for the configured grid.
        needed: usize,
    },

    /// Claim attempt on a claimed, expired, or hidden tile, or any mutation
    /// after the session result is declared.
    #[error("tile is locked")]
    TileLocked,

    /// Unknown tile, item, suggestion, or player.
    #[error("not found: {0}")]
    NotFound(String),

    /// Snapshot store failure (serialization or backing storage).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl EngineError {
    /// Items still missing before the session can start, if this is an
    /// `InsufficientItems` error.
    #[must_use]
    pub fn items_remaining(&self) -> Option<usize> {
        match self {
            EngineError::InsufficientItems { have, needed } => {
                Some(needed.saturating_sub(*have))
            }
            _ => None,
        }
    }
}

/// Convenience alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

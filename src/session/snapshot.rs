//! Per-user persistence snapshots.
//!
//! The engine reads and writes one snapshot per `(session, user)` pair
//! through the `SnapshotStore` seam, keeping it independent of storage
//! technology. A missing snapshot means a fresh start; a present one
//! restores the user's board so it is never re-derived mid-session.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::claims::{TileBoard, TileState};
use crate::core::{EngineError, EngineResult, PlayerId, SessionId};
use crate::items::ItemId;

/// Serializable capture of one user's board and tile state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub columns: usize,
    /// Row-major cell contents (the user's personalized layout).
    pub tile_contents: Vec<Option<ItemId>>,
    /// Per-cell claim and vote state, parallel to `tile_contents`.
    pub tiles: Vec<TileState>,
    /// Whether the session had started when this was captured.
    pub game_started: bool,
}

impl Snapshot {
    /// Capture a user's current board and tile state.
    #[must_use]
    pub fn capture(board: &Board, tiles: &TileBoard, game_started: bool) -> Self {
        Self {
            rows: board.rows(),
            columns: board.columns(),
            tile_contents: board.iter().collect(),
            tiles: tiles.iter().cloned().collect(),
            game_started,
        }
    }

    /// Rebuild the board and tile state this snapshot captured.
    pub fn restore(&self) -> EngineResult<(Board, TileBoard)> {
        if self.tile_contents.len() != self.rows * self.columns
            || self.tiles.len() != self.tile_contents.len()
        {
            return Err(EngineError::Storage(
                "snapshot dimensions are inconsistent".to_string(),
            ));
        }

        let board = Board::from_cells(self.rows, self.columns, self.tile_contents.clone());
        let tiles = TileBoard::from_tiles(self.tiles.clone());
        Ok((board, tiles))
    }
}

/// Storage seam for per-user snapshots.
///
/// Implementations key by `(session, user)`. `load` returning `Ok(None)`
/// means no snapshot exists yet.
pub trait SnapshotStore {
    /// Load the snapshot for one user in one session, if any.
    fn load(&self, session: SessionId, user: PlayerId) -> EngineResult<Option<Snapshot>>;

    /// Persist the snapshot for one user in one session.
    fn save(&mut self, session: SessionId, user: PlayerId, snapshot: &Snapshot)
        -> EngineResult<()>;
}

/// In-memory store holding serialized blobs; the default for tests and
/// single-process hosts.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    blobs: rustc_hash::FxHashMap<(SessionId, PlayerId), Vec<u8>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, session: SessionId, user: PlayerId) -> EngineResult<Option<Snapshot>> {
        match self.blobs.get(&(session, user)) {
            None => Ok(None),
            Some(blob) => bincode::deserialize(blob)
                .map(Some)
                .map_err(|e| EngineError::Storage(e.to_string())),
        }
    }

    fn save(
        &mut self,
        session: SessionId,
        user: PlayerId,
        snapshot: &Snapshot,
    ) -> EngineResult<()> {
        let blob = bincode::serialize(snapshot).map_err(|e| EngineError::Storage(e.to_string()))?;
        self.blobs.insert((session, user), blob);
        Ok(())
    }
}

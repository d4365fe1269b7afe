//! Per-tile claim and vote state.
//!
//! A tile moves through `Open -> Claimed (pending approval) -> Approved`,
//! or gets denied, which does not lock it - denial votes can be overturned
//! by re-voting. Approval is a derived property: a tile counts toward a win
//! once its approval set reaches the session's current threshold.
//!
//! ## Invariants
//!
//! - A voter appears in at most one of `approvals` / `denials`.
//! - Re-voting replaces the prior vote; votes never accumulate per voter.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Claim state for one board cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    /// Whether the owner has claimed this tile.
    pub claimed: bool,

    /// Proof photo (URL or storage key) attached to the claim.
    pub photo: Option<String>,

    /// Free-form note, attachable with or without a claim.
    pub note: Option<String>,

    /// Players who approved the claim.
    pub approvals: ImHashSet<PlayerId>,

    /// Players who denied the claim.
    pub denials: ImHashSet<PlayerId>,
}

impl TileState {
    /// A fresh open tile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the tile claimed with optional proof.
    ///
    /// Any earlier votes are stale once a tile is re-claimed after denial,
    /// so both vote sets reset.
    pub fn claim(&mut self, photo: Option<String>, note: Option<String>) {
        self.claimed = true;
        if photo.is_some() {
            self.photo = photo;
        }
        if note.is_some() {
            self.note = note;
        }
        self.approvals.clear();
        self.denials.clear();
    }

    /// Attach or replace the note without claiming.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Record a vote, replacing any prior vote by the same player.
    pub fn record_vote(&mut self, voter: PlayerId, approve: bool) {
        if approve {
            self.denials.remove(&voter);
            self.approvals.insert(voter);
        } else {
            self.approvals.remove(&voter);
            self.denials.insert(voter);
        }
    }

    /// Whether the claim has reached the approval threshold.
    #[must_use]
    pub fn is_approved(&self, required_approvals: usize) -> bool {
        self.claimed && self.approvals.len() >= required_approvals
    }
}

/// Claim state for every cell of one player's board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBoard {
    tiles: Vec<TileState>,
}

impl TileBoard {
    /// Create open tiles for a board of `len` cells.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            tiles: vec![TileState::new(); len],
        }
    }

    /// Rebuild from explicit tile states (snapshot restore).
    #[must_use]
    pub fn from_tiles(tiles: Vec<TileState>) -> Self {
        Self { tiles }
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TileState> {
        self.tiles.get(index)
    }

    /// Mutable tile access.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TileState> {
        self.tiles.get_mut(index)
    }

    /// Iterate over tiles in board order.
    pub fn iter(&self) -> impl Iterator<Item = &TileState> {
        self.tiles.iter()
    }
}

//! # bingo-engine
//!
//! A multiplayer bingo-style game session engine. Players receive
//! individually-randomized boards drawn from a shared item pool, claim tiles
//! by submitting proof (photo/note), and tiles count toward a win only after
//! peer approval. The first satisfied win condition freezes the session.
//!
//! ## Design Principles
//!
//! 1. **Engine, not app**: transport, rendering, storage technology, and
//!    identity management are external collaborators behind small seams
//!    (`SnapshotStore`, the message log, `Clock`).
//!
//! 2. **Deterministic boards**: each board comes from a seeded shuffle of
//!    `(session seed, username)`; boards are generated once and cached,
//!    never re-derived mid-session.
//!
//! 3. **Transactional operations**: every fallible operation either fully
//!    applies or leaves state untouched. No error is fatal to a session.
//!
//! ## Modules
//!
//! - `core`: player IDs, errors, seeded RNG, session configuration
//! - `items`: the item pool, suggestions, `@mention` visibility
//! - `board`: the grid type and deterministic board generation
//! - `timer`: per-item countdowns, the clock seam, the 1 Hz ticker
//! - `claims`: per-tile claim and vote state
//! - `win`: fixed-priority win evaluation
//! - `session`: roster, messages, snapshots, and the `GameSession`

pub mod board;
pub mod claims;
pub mod core;
pub mod items;
pub mod session;
pub mod timer;
pub mod win;

// Re-export commonly used types
pub use crate::core::{
    BoardRng, EngineError, EngineResult, PlayerId, SessionConfig, SessionId, WinConditions,
};

pub use crate::items::{
    extract_mentions, min_items_required, Item, ItemId, ItemRegistry, Suggestion, SuggestionId,
    MASKED_TEXT,
};

pub use crate::board::{generate_board, Board};

pub use crate::timer::{Clock, ItemTimer, ManualClock, SessionTicker, SystemClock, TimerTracker};

pub use crate::claims::{TileBoard, TileState};

pub use crate::win::{evaluate, SessionResult, WinningLine};

pub use crate::session::{
    GameSession, MemorySnapshotStore, MessageId, MessageLog, MessagePayload, PlayerProfile, Role,
    Roster, Snapshot, SnapshotStore, SystemMessage, SYSTEM_SENDER,
};

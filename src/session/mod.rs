//! Session orchestration: membership, messages, persistence, and the
//! `GameSession` itself.

pub mod message;
pub mod roster;
pub mod session;
pub mod snapshot;

pub use message::{MessageId, MessageLog, MessagePayload, SystemMessage, SYSTEM_SENDER};
pub use roster::{PlayerProfile, Role, Roster};
pub use session::GameSession;
pub use snapshot::{MemorySnapshotStore, Snapshot, SnapshotStore};

//! System messages for the chat/notification collaborator.
//!
//! Every state transition appends a human-readable message with a typed
//! payload to the session's log. The engine never renders these; the
//! transport layer reads the log (typically `since` its last seen ID) and
//! displays them however it likes.

use im::Vector;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::PlayerId;
use crate::items::{ItemId, SuggestionId};
use crate::win::WinningLine;

/// Sender recorded on engine-emitted messages.
pub const SYSTEM_SENDER: &str = "System";

/// Monotonic message identifier within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Create a new message ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Message({})", self.0)
    }
}

/// Machine-readable description of the transition behind a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePayload {
    /// An item entered the pool.
    ItemAdded { item: ItemId },
    /// An item's text or metadata changed.
    ItemUpdated { item: ItemId },
    /// An item left the pool.
    ItemRemoved { item: ItemId },
    /// A player proposed an item.
    SuggestionMade { suggestion: SuggestionId, by: PlayerId },
    /// The creator approved a suggestion into the pool.
    SuggestionApproved { item: ItemId },
    /// The creator discarded a suggestion.
    SuggestionRejected { suggestion: SuggestionId },
    /// A player joined the roster.
    PlayerJoined { player: PlayerId },
    /// Boards were generated and timers started.
    SessionStarted,
    /// A player claimed a tile on their board.
    TileClaimed { player: PlayerId, tile: usize },
    /// A peer voted on a claim.
    VoteCast {
        voter: PlayerId,
        owner: PlayerId,
        tile: usize,
        approved: bool,
    },
    /// An item's countdown ran out.
    TimerExpired { item: ItemId },
    /// A win condition fired; the session is frozen.
    WinDeclared { winner: PlayerId, line: WinningLine },
}

/// One entry in the session's message log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    /// Monotonic ID, usable as a cursor by the transport layer.
    pub id: MessageId,
    /// Always `SYSTEM_SENDER` for engine-emitted messages.
    pub sender: String,
    /// Human-readable text for display.
    pub message: String,
    /// When the transition happened.
    pub timestamp: OffsetDateTime,
    /// Typed description of the transition.
    pub payload: MessagePayload,
}

/// Append-only message log with monotonic IDs.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vector<SystemMessage>,
    next_id: u64,
}

impl MessageLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its assigned ID.
    pub fn push(
        &mut self,
        timestamp: OffsetDateTime,
        message: impl Into<String>,
        payload: MessagePayload,
    ) -> MessageId {
        let id = MessageId::new(self.next_id);
        self.next_id += 1;

        self.messages.push_back(SystemMessage {
            id,
            sender: SYSTEM_SENDER.to_string(),
            message: message.into(),
            timestamp,
            payload,
        });
        id
    }

    /// Number of messages logged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&SystemMessage> {
        self.messages.last()
    }

    /// Iterate over all messages in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &SystemMessage> {
        self.messages.iter()
    }

    /// Messages strictly after `cursor`, for incremental transport reads.
    pub fn since(&self, cursor: MessageId) -> impl Iterator<Item = &SystemMessage> {
        self.messages.iter().filter(move |m| m.id > cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    #[test]
    fn test_push_assigns_monotonic_ids() {
        let mut log = MessageLog::new();

        let a = log.push(t0(), "first", MessagePayload::SessionStarted);
        let b = log.push(
            t0(),
            "second",
            MessagePayload::PlayerJoined { player: PlayerId::new(1) },
        );

        assert!(b > a);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().message, "second");
        assert_eq!(log.last().unwrap().sender, SYSTEM_SENDER);
    }

    #[test]
    fn test_since_cursor() {
        let mut log = MessageLog::new();
        let a = log.push(t0(), "a", MessagePayload::SessionStarted);
        log.push(t0(), "b", MessagePayload::SessionStarted);
        log.push(t0(), "c", MessagePayload::SessionStarted);

        let tail: Vec<_> = log.since(a).map(|m| m.message.as_str()).collect();
        assert_eq!(tail, vec!["b", "c"]);
    }

    #[test]
    fn test_message_serde() {
        let mut log = MessageLog::new();
        log.push(
            t0(),
            "claimed",
            MessagePayload::TileClaimed { player: PlayerId::new(0), tile: 3 },
        );

        let json = serde_json::to_string(log.last().unwrap()).unwrap();
        let back: SystemMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, log.last().unwrap());
    }
}

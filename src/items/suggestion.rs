//! Suggestions - proposed items awaiting creator approval.
//!
//! Any player can propose an item. The suggestion sits in the registry's
//! pending set until the session creator approves it (it becomes an `Item`
//! and leaves the pending set) or rejects it (it is discarded).

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use super::item::{extract_mentions, Item, ItemId};

/// Unique identifier for a pending suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionId(pub u32);

impl SuggestionId {
    /// Create a new suggestion ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Suggestion({})", self.0)
    }
}

/// A proposed item, identical in shape to `Item` plus its proposer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique identifier within the pending set.
    pub id: SuggestionId,

    /// Proposed display text, stored exactly as entered.
    pub text: String,

    /// Usernames the resulting item would be hidden from.
    pub hidden_from: ImHashSet<String>,

    /// Proposed countdown in minutes; 0 means no timer.
    pub timer_minutes: u32,

    /// Username of the proposing player.
    pub suggested_by: String,
}

impl Suggestion {
    /// Create a suggestion, extracting `@mention` visibility from the text.
    #[must_use]
    pub fn new(id: SuggestionId, text: impl Into<String>, suggested_by: impl Into<String>) -> Self {
        let text = text.into();
        let hidden_from = extract_mentions(&text).into_iter().collect();

        Self {
            id,
            text,
            hidden_from,
            timer_minutes: 0,
            suggested_by: suggested_by.into(),
        }
    }

    /// Hide the resulting item from additional users (builder pattern).
    #[must_use]
    pub fn with_hidden_from<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for user in users {
            self.hidden_from.insert(user.into());
        }
        self
    }

    /// Set the proposed countdown timer (builder pattern).
    #[must_use]
    pub fn with_timer(mut self, minutes: u32) -> Self {
        self.timer_minutes = minutes;
        self
    }

    /// Convert into an item under the given pool ID (on approval).
    #[must_use]
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            text: self.text,
            hidden_from: self.hidden_from,
            timer_minutes: self.timer_minutes,
        }
    }
}

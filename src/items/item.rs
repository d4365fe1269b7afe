//! Item definitions - tile contents.
//!
//! An `Item` is the text behind a board tile plus its metadata: which users
//! it is hidden from and an optional countdown timer. Items are owned by the
//! session and immutable once the session starts; only timer-derived runtime
//! state (in `crate::timer`) changes afterwards.
//!
//! ## Mentions
//!
//! Any `@username` substring in the item text marks that user as hidden-from:
//! the item never appears on their board. The raw text is stored unmodified -
//! mentions stay visible in the display text on everyone else's board so
//! items read naturally. Rendering for a hidden-from viewer goes through
//! `display_text_for`, which substitutes a masked placeholder.

use im::HashSet as ImHashSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder shown to a user an item is hidden from.
pub const MASKED_TEXT: &str = "A tile about you!";

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\w+)").expect("mention pattern"));

/// Extract `@username` mentions from item text.
///
/// ```
/// use bingo_engine::items::extract_mentions;
///
/// let mentions = extract_mentions("Catch @Alex napping with @sam_b");
/// assert_eq!(mentions, vec!["Alex".to_string(), "sam_b".to_string()]);
/// ```
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Unique identifier for an item in the session pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Create a new item ID.
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

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// A single tile's content and metadata.
///
/// ## Example
///
/// ```
/// use bingo_engine::items::{Item, ItemId};
///
/// let item = Item::new(ItemId::new(1), "Spot @Alex dancing").with_timer(5);
///
/// assert!(item.is_hidden_from("Alex"));
/// assert!(!item.is_hidden_from("Bea"));
/// assert!(item.has_timer());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the session.
    pub id: ItemId,

    /// Display text, stored exactly as entered (mentions included).
    pub text: String,

    /// Usernames this item is hidden from.
    pub hidden_from: ImHashSet<String>,

    /// Countdown in minutes once the session starts; 0 means no timer.
    pub timer_minutes: u32,
}

impl Item {
    /// Create an item, extracting `@mention` visibility from the text.
    #[must_use]
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        let text = text.into();
        let hidden_from = extract_mentions(&text).into_iter().collect();

        Self {
            id,
            text,
            hidden_from,
            timer_minutes: 0,
        }
    }

    /// Hide this item from additional users (builder pattern).
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

    /// Set the countdown timer (builder pattern).
    #[must_use]
    pub fn with_timer(mut self, minutes: u32) -> Self {
        self.timer_minutes = minutes;
        self
    }

    /// Whether this item carries a countdown timer.
    #[must_use]
    pub fn has_timer(&self) -> bool {
        self.timer_minutes > 0
    }

    /// Whether this item must not appear on `username`'s board.
    #[must_use]
    pub fn is_hidden_from(&self, username: &str) -> bool {
        self.hidden_from.contains(username)
    }

    /// Text to render for `viewer`: the real text, or a masked placeholder
    /// when the item is hidden from them.
    #[must_use]
    pub fn display_text_for(&self, viewer: &str) -> &str {
        if self.is_hidden_from(viewer) {
            MASKED_TEXT
        } else {
            &self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id() {
        let id = ItemId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Item(42)");
    }

    #[test]
    fn test_extract_mentions() {
        assert_eq!(extract_mentions("no mentions here"), Vec::<String>::new());
        assert_eq!(extract_mentions("@Alex sleeps"), vec!["Alex"]);
        assert_eq!(
            extract_mentions("@a and @b_2 chat"),
            vec!["a".to_string(), "b_2".to_string()]
        );
    }

    #[test]
    fn test_mentions_populate_hidden_from() {
        let item = Item::new(ItemId::new(1), "Catch @Alex and @Bea arguing");

        assert!(item.is_hidden_from("Alex"));
        assert!(item.is_hidden_from("Bea"));
        assert!(!item.is_hidden_from("Cleo"));
    }

    #[test]
    fn test_text_stored_unmodified() {
        // Mentions are not stripped from display text.
        let item = Item::new(ItemId::new(1), "Catch @Alex napping");
        assert_eq!(item.text, "Catch @Alex napping");
        assert_eq!(item.display_text_for("Bea"), "Catch @Alex napping");
    }

    #[test]
    fn test_masked_display_for_hidden_viewer() {
        let item = Item::new(ItemId::new(1), "Catch @Alex napping");
        assert_eq!(item.display_text_for("Alex"), MASKED_TEXT);
    }

    #[test]
    fn test_explicit_hidden_from_merges_with_mentions() {
        let item = Item::new(ItemId::new(1), "About @Alex").with_hidden_from(["Bea"]);

        assert!(item.is_hidden_from("Alex"));
        assert!(item.is_hidden_from("Bea"));
    }

    #[test]
    fn test_timer_builder() {
        let plain = Item::new(ItemId::new(1), "x");
        assert!(!plain.has_timer());

        let timed = Item::new(ItemId::new(2), "y").with_timer(3);
        assert!(timed.has_timer());
        assert_eq!(timed.timer_minutes, 3);
    }

    #[test]
    fn test_item_serde() {
        let item = Item::new(ItemId::new(1), "Spot @Alex").with_timer(2);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, item.id);
        assert_eq!(back.text, item.text);
        assert!(back.is_hidden_from("Alex"));
        assert_eq!(back.timer_minutes, 2);
    }
}

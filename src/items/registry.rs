//! Item registry: the session's pool of tile contents.
//!
//! The registry owns the approved item pool and the pending suggestion set.
//! Iteration follows insertion order, which keeps board generation
//! deterministic for a fixed seed.
//!
//! Authorization (only the session creator curates items and approves
//! suggestions) is enforced one level up, in `crate::session`; the registry
//! itself only validates content.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

use super::item::{Item, ItemId};
use super::suggestion::{Suggestion, SuggestionId};

/// Minimum pool size required to start a session on a `rows x columns` grid.
///
/// The pool must exceed the tile count by 30% (rounded up) so boards differ
/// meaningfully between players.
///
/// ```
/// use bingo_engine::items::min_items_required;
///
/// assert_eq!(min_items_required(4, 3), 16); // ceil(12 + 3.6)
/// ```
#[must_use]
pub fn min_items_required(rows: usize, columns: usize) -> usize {
    let total = rows * columns;
    (total * 13).div_ceil(10)
}

/// The session's item pool and pending suggestions.
///
/// ## Example
///
/// ```
/// use bingo_engine::items::ItemRegistry;
///
/// let mut registry = ItemRegistry::new();
/// let id = registry.add_item("Spot a llama", &[], 0).unwrap();
///
/// assert_eq!(registry.get(id).unwrap().text, "Spot a llama");
/// assert!(registry.add_item("   ", &[], 0).is_err());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemRegistry {
    items: FxHashMap<ItemId, Item>,
    /// Insertion order of live items; the canonical pool ordering.
    order: Vec<ItemId>,
    suggestions: FxHashMap<SuggestionId, Suggestion>,
    suggestion_order: Vec<SuggestionId>,
    next_item_id: u32,
    next_suggestion_id: u32,
}

impl ItemRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn validate_text(text: &str) -> EngineResult<()> {
        if text.trim().is_empty() {
            return Err(EngineError::Validation("item text is empty".to_string()));
        }
        Ok(())
    }

    /// Add an item to the pool.
    ///
    /// `@mention` usernames in the text and the explicit `hidden_from` list
    /// both contribute to the item's visibility restriction. Rejects
    /// empty/whitespace-only text.
    pub fn add_item(
        &mut self,
        text: impl Into<String>,
        hidden_from: &[&str],
        timer_minutes: u32,
    ) -> EngineResult<ItemId> {
        let text = text.into();
        Self::validate_text(&text)?;

        let id = ItemId::new(self.next_item_id);
        self.next_item_id += 1;

        let item = Item::new(id, text)
            .with_hidden_from(hidden_from.iter().copied())
            .with_timer(timer_minutes);

        self.items.insert(id, item);
        self.order.push(id);
        Ok(id)
    }

    /// Replace an item's text and metadata.
    ///
    /// Visibility is recomputed from the new text plus `hidden_from`.
    pub fn update_item(
        &mut self,
        id: ItemId,
        text: impl Into<String>,
        hidden_from: &[&str],
        timer_minutes: u32,
    ) -> EngineResult<()> {
        let text = text.into();
        Self::validate_text(&text)?;

        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| EngineError::NotFound(format!("{id}")))?;

        *item = Item::new(id, text)
            .with_hidden_from(hidden_from.iter().copied())
            .with_timer(timer_minutes);
        Ok(())
    }

    /// Remove an item from the pool.
    ///
    /// Returns true if the item existed; a no-op otherwise. Boards generated
    /// before the removal are unaffected (they reference their own cached
    /// cell contents).
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.items.remove(&id).is_some() {
            self.order.retain(|&i| i != id);
            true
        } else {
            false
        }
    }

    /// Propose an item for creator approval.
    pub fn propose_suggestion(
        &mut self,
        text: impl Into<String>,
        suggested_by: impl Into<String>,
        hidden_from: &[&str],
        timer_minutes: u32,
    ) -> EngineResult<SuggestionId> {
        let text = text.into();
        Self::validate_text(&text)?;

        let id = SuggestionId::new(self.next_suggestion_id);
        self.next_suggestion_id += 1;

        let suggestion = Suggestion::new(id, text, suggested_by)
            .with_hidden_from(hidden_from.iter().copied())
            .with_timer(timer_minutes);

        self.suggestions.insert(id, suggestion);
        self.suggestion_order.push(id);
        Ok(id)
    }

    /// Convert a pending suggestion into a pool item.
    ///
    /// The suggestion leaves the pending set.
    pub fn approve_suggestion(&mut self, id: SuggestionId) -> EngineResult<ItemId> {
        let suggestion = self
            .suggestions
            .remove(&id)
            .ok_or_else(|| EngineError::NotFound(format!("{id}")))?;
        self.suggestion_order.retain(|&s| s != id);

        let item_id = ItemId::new(self.next_item_id);
        self.next_item_id += 1;

        self.items.insert(item_id, suggestion.into_item(item_id));
        self.order.push(item_id);
        Ok(item_id)
    }

    /// Discard a pending suggestion.
    pub fn reject_suggestion(&mut self, id: SuggestionId) -> EngineResult<Suggestion> {
        let suggestion = self
            .suggestions
            .remove(&id)
            .ok_or_else(|| EngineError::NotFound(format!("{id}")))?;
        self.suggestion_order.retain(|&s| s != id);
        Ok(suggestion)
    }

    /// Get an item by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get a pending suggestion by ID.
    #[must_use]
    pub fn get_suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.suggestions.get(&id)
    }

    /// Check if an item ID is in the pool.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of items in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of pending suggestions.
    #[must_use]
    pub fn suggestion_count(&self) -> usize {
        self.suggestion_order.len()
    }

    /// Iterate over pool items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Iterate over pending suggestions in proposal order.
    pub fn suggestions(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestion_order
            .iter()
            .filter_map(|id| self.suggestions.get(id))
    }
}

//! Item system: tile contents, suggestions, and the session pool.
//!
//! ## Key Types
//!
//! - `ItemId` / `Item`: a tile's text, visibility restriction, and timer
//! - `SuggestionId` / `Suggestion`: a proposed item pending creator approval
//! - `ItemRegistry`: the pool, with insertion-ordered iteration
//!
//! `min_items_required` gives the pool size floor for a given grid.

pub mod item;
pub mod registry;
pub mod suggestion;

pub use item::{extract_mentions, Item, ItemId, MASKED_TEXT};
pub use registry::{min_items_required, ItemRegistry};
pub use suggestion::{Suggestion, SuggestionId};

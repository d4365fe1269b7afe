//! Claim workflow state: per-tile claims, proof, and peer votes.
//!
//! The claim/vote *rules* (who may claim what, when) live in
//! `crate::session`; this module owns the tile-level bookkeeping and its
//! invariants.

pub mod tile;

pub use tile::{TileBoard, TileState};

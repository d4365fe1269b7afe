//! Core engine types: players, errors, RNG, configuration.
//!
//! These are the building blocks the rest of the engine is assembled from.
//! Session-level orchestration lives in `crate::session`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{SessionConfig, SessionId, WinConditions};
pub use error::{EngineError, EngineResult};
pub use player::PlayerId;
pub use rng::BoardRng;

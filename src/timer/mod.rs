//! Timer subsystem: per-item countdowns and the session ticker.
//!
//! ## Key Types
//!
//! - `Clock` / `SystemClock` / `ManualClock`: the time seam
//! - `ItemTimer` / `TimerTracker`: countdown state per timed item
//! - `SessionTicker`: the owned 1 Hz tokio task driving `GameSession::tick`

pub mod clock;
pub mod ticker;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ticker::SessionTicker;
pub use tracker::{ItemTimer, TimerTracker};

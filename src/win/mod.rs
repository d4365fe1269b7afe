//! Win evaluation: fixed-priority line checks over claimed+approved tiles.

pub mod evaluator;

pub use evaluator::{evaluate, SessionResult, WinningLine};

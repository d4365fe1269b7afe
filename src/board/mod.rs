//! Board system: the grid type and the deterministic generator.

pub mod generator;
pub mod grid;

pub use generator::generate_board;
pub use grid::Board;

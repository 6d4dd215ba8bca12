//! Game of Life core functionality

pub mod grid;
pub mod pattern;
pub mod rules;

pub use grid::AutomatonGrid;
pub use pattern::{create_example_patterns, save_snapshot, snapshot, Pattern, PatternError};
pub use rules::LifeRules;

//! Domain types used throughout the render pass.
//!
//! This module defines:
//!
//! - input records (`ScoreRecord`)
//! - the fixed cell grid (`CellIndex`, `Bounds`, `Cell`, `Tier`)
//! - the static 9-box cell table (`CELLS`)

pub mod cells;
pub mod types;

pub use cells::*;
pub use types::*;

//! Board engine: grid state, oriented line access, the slide/merge transform,
//! the move orchestrator and random tile insertion.
//!
//! Values are stored as plain tile values (2, 4, 8, ...), 0 for empty, up to
//! [`MAX_TILE`].

pub mod direction;
pub mod line;
mod ops;
mod spawn;
pub mod state;

pub use direction::{Axis, Move};
pub use line::{can_collapse, can_slide, collapse, Collapsed};
pub use spawn::Spawned;
pub use state::{Board, Snapshot};

/// A tile value: 0 or a power of two >= 2.
pub type Tile = u32;
/// Accumulated merge points.
pub type Score = u64;

/// Largest tile a `Tile` can hold. Tiles of this value never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

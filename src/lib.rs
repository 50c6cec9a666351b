//! merge-2048: a sliding-tile 2048 board engine
//!
//! This crate provides:
//! - A rectangular `Board` of any positive width/height with a running score
//! - Legality detection per direction (`is_legal`, `legal_moves`)
//! - The single-pass slide/merge line transform (`engine::line`)
//! - Random tile insertion driven by an RNG owned by the board
//! - `BoardConfig` for TOML-driven construction
//!
//! Quick start:
//! ```
//! use merge_2048::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut b = Board::with_rng(4, 4, 2, 0.9, StdRng::seed_from_u64(42)).unwrap();
//! let before = b.score();
//! if let Some(&dir) = b.legal_moves().first() {
//!     assert!(b.make_move(dir).unwrap());
//! }
//! assert!(b.score() >= before);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use merge_2048::config::BoardConfig;
//! use merge_2048::engine::Board;
//!
//! let cfg = BoardConfig { seed: Some(123), ..BoardConfig::default() };
//! let mut b = Board::from_config(&cfg).unwrap();
//! let mut moves = 0u32;
//! // Game over is the caller's call: no legal move left.
//! while let Some(&dir) = b.legal_moves().first() {
//!     b.make_move(dir).unwrap();
//!     moves += 1;
//!     if moves == 8 { break; }
//! }
//! println!("{}score: {}", b, b.score());
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;

pub use error::EngineError;

//! # tilematch-engine: Memory Game Engine Core
//!
//! A deterministic engine for the tile-matching ("memory") card game. Builds
//! a shuffled deck of paired symbols, resolves flips, scores the session with
//! try and time penalties, and persists the best score between sessions.
//!
//! ## Core Modules
//!
//! - [`symbol`] - Opaque card identities
//! - [`deck`] - Paired deck construction and seeded ChaCha20 shuffling
//! - [`tile`] - Per-position visibility state
//! - [`engine`] - Flip resolution, win detection, and session state
//! - [`scoring`] - Score formula and its constants
//! - [`highscore`] - Highscore persistence (JSON file and in-memory stores)
//! - [`clock`] - Injectable time source
//! - [`logger`] - JSONL records of finished games
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use tilematch_engine::clock::SystemClock;
//! use tilematch_engine::engine::{EngineConfig, FlipOutcome, GameEngine};
//! use tilematch_engine::highscore::MemoryStore;
//! use tilematch_engine::symbol::Symbol;
//!
//! let mut engine = GameEngine::new(
//!     &Symbol::range(8),
//!     MemoryStore::new(),
//!     SystemClock,
//!     EngineConfig::with_seed(42),
//! )
//! .unwrap();
//! assert_eq!(engine.deck_size(), 16);
//!
//! match engine.flip(0).unwrap() {
//!     FlipOutcome::PendingFirst { position, .. } => assert_eq!(position, 0),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```
//!
//! ## Deterministic Shuffles
//!
//! The same seed and symbol set always produce the same layout:
//!
//! ```rust
//! use tilematch_engine::deck::Deck;
//! use tilematch_engine::symbol::Symbol;
//!
//! let d1 = Deck::new_with_seed(&Symbol::range(6), 7).unwrap();
//! let d2 = Deck::new_with_seed(&Symbol::range(6), 7).unwrap();
//! assert_eq!(d1, d2);
//! ```

pub mod clock;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod highscore;
pub mod logger;
pub mod scoring;
pub mod symbol;
pub mod tile;

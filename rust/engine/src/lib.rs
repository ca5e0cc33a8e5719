//! # jukugo-engine: Jukugo Relay Core
//!
//! Two players take turns submitting two-character compound words (jukugo). Each word
//! must keep the character at the submitter's own position (0 or 1) from the previous
//! word and change the other one, and no word may be used twice in a match.
//!
//! ## Core Modules
//!
//! - [`dictionary`] - Word list normalisation and the bundled demo list
//! - [`pool`] - Per-participant word pool with consumption tracking and scopes
//! - [`rules`] - Player ids and the positional relay rule
//! - [`checker`] - Checker pipeline producing per-turn diagnostics
//! - [`state`] - Turn record (observation, info, reward, done)
//! - [`env`] - Relay environment: one participant's leg of the relay
//! - [`player`] - Player variants and the game master
//! - [`game`] - Match session driving two seats to a winner
//! - [`logger`] - Match events and JSONL match records
//! - [`rng`] - Injectable word selection
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use jukugo_engine::rules::{relay_matches, PlayerId};
//!
//! // player 1 keeps position 1 and changes position 0
//! assert!(relay_matches("花火", "山火", PlayerId::SECOND));
//! assert!(!relay_matches("花火", "花見", PlayerId::SECOND));
//! ```
//!
//! ## Deterministic Play
//!
//! Every random choice goes through a [`rng::WordSelector`]:
//!
//! ```rust
//! use jukugo_engine::rng::{SeededSelector, WordSelector};
//!
//! let mut a = SeededSelector::new_with_seed(42);
//! let mut b = SeededSelector::new_with_seed(42);
//! assert_eq!(a.sample(100, 10), b.sample(100, 10));
//! ```

pub mod checker;
pub mod dictionary;
pub mod env;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod pool;
pub mod rng;
pub mod rules;
pub mod state;

//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and the state they act on. It has
//! **no dependencies** on timing, terminals or I/O, making it:
//!
//! - **Deterministic**: Same seed deals the same boards and makes the same guesses
//! - **Testable**: Every rule is a plain function or a method on [`Table`]
//! - **Portable**: Usable from the terminal front-end or headless runs
//!
//! # Module Structure
//!
//! - [`deck`]: deals a shuffled board for a level
//! - [`ledger`]: the opponent's memory of tiles seen in failed attempts
//! - [`resolver`]: judges a face-up pair and updates score, matched set and ledger
//! - [`turn`]: decides who moves after each judged pair
//! - [`opponent`]: recall-then-guess decision for the scripted opponent
//! - [`level`]: level sizing and board completion
//! - [`table`]: the single owned game state tying the above together
//! - [`snapshot`]: read-only view handed to the presentation layer
//! - [`rng`]: seeded random sources
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{ReplayRng, Table};
//! use tui_memory_types::{MatchOutcome, Mode, Side, TileId};
//!
//! let mut table = Table::new();
//! table.start(Mode::Versus, &mut ReplayRng::identity());
//! assert_eq!(table.board().len(), 4);
//!
//! // Ids 0 and 1 always share a value.
//! table.select(TileId(0));
//! table.select(TileId(1));
//! let result = table.resolve_selection(Side::User).unwrap();
//! assert_eq!(result.outcome, MatchOutcome::Matched);
//! assert_eq!(table.score().user, 1);
//! ```

pub mod board;
pub mod deck;
pub mod ledger;
pub mod level;
pub mod opponent;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod table;
pub mod turn;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MatchedSet};
pub use deck::build_board;
pub use ledger::MemoryLedger;
pub use level::Level;
pub use opponent::{choose_pair, Choice};
pub use rng::{RandomSource, ReplayRng, SimpleRng};
pub use scoring::Score;
pub use snapshot::{Face, GameSnapshot, TileSnapshot};
pub use table::{Resolution, Table};

//! Game engine - turns, pacing and the opponent
//!
//! Wraps the pure rules in `core` with the time-driven part of the game:
//!
//! - [`engine`]: the composition root ([`GameEngine`]) and its phase machine
//! - [`scheduler`]: virtual-clock scheduler for deferred continuations
//! - [`clock`]: wall-clock and manual time sources
//! - [`config`]: pause lengths and seeding, with environment overrides
//!
//! # Example
//!
//! ```
//! use tui_memory_engine::{EngineConfig, GameEngine, Timings};
//! use tui_memory_types::{Mode, Phase};
//!
//! let mut engine = GameEngine::new(EngineConfig::with_seed(7).with_timings(Timings::default()));
//! engine.choose_mode(Mode::Versus);
//!
//! let ids: Vec<_> = engine.snapshot().tiles.iter().map(|t| t.id).collect();
//! engine.select_tile(ids[0]);
//! engine.select_tile(ids[1]);
//! assert_eq!(engine.phase(), Phase::Revealing);
//!
//! engine.advance(600);
//! assert_eq!(engine.phase(), Phase::Cooldown);
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod scheduler;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{EngineConfig, Timings};
pub use engine::{GameEngine, GameEvent};
pub use scheduler::Scheduler;

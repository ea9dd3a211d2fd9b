//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::UiAction`] and keeps the
//! board cursor. Nothing here touches game state; the binary turns cursor
//! positions into tile ids and hands them to the engine.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};

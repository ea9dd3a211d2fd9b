//! Terminal rendering for the memory game.
//!
//! Game state is drawn into a plain framebuffer first and only then flushed to
//! the terminal, so every screen can be unit-tested without a tty:
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot to framebuffer (pure)
//! - [`renderer`]: framebuffer to terminal, redrawing only dirty row spans

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, Screen, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

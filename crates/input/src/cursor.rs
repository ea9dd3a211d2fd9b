//! Board cursor.
//!
//! Tiles are laid out row-major in [`grid_columns`] columns, so a cursor is
//! just an index into the board order.

use crate::types::{grid_columns, UiAction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    index: usize,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// (row, column) for a board of `tile_count` tiles.
    pub fn cell(&self, tile_count: usize) -> (usize, usize) {
        let cols = grid_columns(tile_count);
        (self.index / cols, self.index % cols)
    }

    /// Apply a cursor action. Returns true if the cursor moved.
    ///
    /// Moves that would leave the grid are ignored; a short last row is
    /// treated as ragged, not wrapped.
    pub fn apply(&mut self, action: UiAction, tile_count: usize) -> bool {
        if tile_count == 0 {
            return false;
        }
        let cols = grid_columns(tile_count);
        let col = self.index % cols;

        let target = match action {
            UiAction::CursorLeft if col > 0 => Some(self.index - 1),
            UiAction::CursorRight if col + 1 < cols => Some(self.index + 1),
            UiAction::CursorUp => self.index.checked_sub(cols),
            UiAction::CursorDown => Some(self.index + cols),
            _ => None,
        };

        match target {
            Some(next) if next < tile_count && next != self.index => {
                self.index = next;
                true
            }
            _ => false,
        }
    }

    /// Keep the cursor on the board after it changes size.
    pub fn clamp(&mut self, tile_count: usize) {
        if self.index >= tile_count {
            self.index = tile_count.saturating_sub(1);
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

//! Level progression
//!
//! A level is a board size. Level `L` deals `L + 1` pair values
//! (`2..=L + 2`); clearing the board advances to `L + 1`.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::board::{Board, MatchedSet};
use crate::types::FIRST_PAIR_VALUE;

/// Difficulty level, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u32);

impl Level {
    pub const FIRST: Level = Level(1);

    /// Returns `None` for 0.
    pub fn new(level: u32) -> Option<Self> {
        (level >= 1).then_some(Self(level))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Distinct pair values dealt at this level.
    pub fn pair_count(&self) -> usize {
        self.0 as usize + 1
    }

    pub fn tile_count(&self) -> usize {
        self.pair_count() * 2
    }

    /// Pair values dealt at this level, ascending.
    pub fn values(&self) -> RangeInclusive<u32> {
        FIRST_PAIR_VALUE..=self.0 + FIRST_PAIR_VALUE
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

/// True once every tile of a non-empty board is matched.
pub fn is_complete(board: &Board, matched: &MatchedSet) -> bool {
    !board.is_empty() && matched.len() == board.len()
}

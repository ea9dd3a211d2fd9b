//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable from the core rules, the engine's
//! phase machine and the terminal front-end alike.
//!
//! # Board Sizing
//!
//! A board at level `L` holds `L + 1` distinct pair values (`2..=L + 2`), each
//! appearing exactly twice, for `2 * (L + 1)` tiles in total.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds of engine (virtual) time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `REVEAL_PAUSE_MS` | 600 | Both picks shown before the pair is judged |
//! | `RESULT_PAUSE_MS` | 1000 | Result shown before the selection is cleared |
//! | `MISS_CLEAR_MS` | 800 | Versus user miss: result shown before clearing |
//! | `HANDOFF_MS` | 1200 | Versus user miss: cleared board before the opponent takes over |
//! | `OPPONENT_THINK_MS` | 1200 | Opponent "thinking" before its picks are revealed |
//! | `OPPONENT_REVEAL_MS` | 700 | Opponent picks shown before the pair is judged |
//! | `LEVEL_ADVANCE_MS` | 1500 | Full board shown before the next level is dealt |
//! | `INTRO_MS` | 2000 | Splash screen duration |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{Mode, Side, TileId, TileValue, Tile};
//!
//! let tile = Tile::new(TileId(0), TileValue(2));
//! assert_eq!(tile.value, TileValue(2));
//!
//! assert_eq!(Mode::from_str("versus"), Some(Mode::Versus));
//! assert_eq!(Side::User.other(), Side::Opponent);
//! ```

use serde::Serialize;

/// Smallest pair value dealt on any board.
pub const FIRST_PAIR_VALUE: u32 = 2;

/// Both user picks stay face-up this long before the pair is judged.
pub const REVEAL_PAUSE_MS: u32 = 600;

/// Result window before the selection is cleared and the turn applied.
pub const RESULT_PAUSE_MS: u32 = 1000;

/// Versus mode, user miss: shorter result window before the picks flip back.
pub const MISS_CLEAR_MS: u32 = 800;

/// Versus mode, user miss: pause between flipping back and the opponent's turn.
pub const HANDOFF_MS: u32 = 1200;

/// Opponent "thinking" time before its choice is computed and revealed.
pub const OPPONENT_THINK_MS: u32 = 1200;

/// Opponent picks stay face-up this long before the pair is judged.
pub const OPPONENT_REVEAL_MS: u32 = 700;

/// Completed board stays on screen this long before the next level is dealt.
pub const LEVEL_ADVANCE_MS: u32 = 1500;

/// Splash screen duration.
pub const INTRO_MS: u32 = 2000;

/// Stable identity of a tile for the lifetime of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

/// Pair-matching key; rendered as a number of dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TileValue(pub u32);

/// A single card on the board. Immutable once dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: TileValue,
}

impl Tile {
    pub const fn new(id: TileId, value: TileValue) -> Self {
        Self { id, value }
    }

    pub fn matches(&self, other: &Tile) -> bool {
        self.value == other.value
    }
}

/// Who may act. The single source of truth for turn ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    User,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Self {
        match self {
            Side::User => Side::Opponent,
            Side::Opponent => Side::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::User => "user",
            Side::Opponent => "opponent",
        }
    }
}

/// Game mode, chosen once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One player clearing the board alone.
    Solo,
    /// User against the scripted opponent.
    Versus,
}

impl Mode {
    /// Parse mode from string (case-insensitive)
    ///
    /// Accepts the names and the menu shortcuts `1` / `2`.
    ///
    /// ```
    /// use tui_memory_types::Mode;
    ///
    /// assert_eq!(Mode::from_str("Solo"), Some(Mode::Solo));
    /// assert_eq!(Mode::from_str("2"), Some(Mode::Versus));
    /// assert_eq!(Mode::from_str("coop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "solo" | "single" | "1" => Some(Mode::Solo),
            "versus" | "vs" | "2" => Some(Mode::Versus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Solo => "solo",
            Mode::Versus => "versus",
        }
    }

    pub fn has_opponent(&self) -> bool {
        matches!(self, Mode::Versus)
    }
}

/// Result of judging two face-up tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Matched,
    Missed,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched)
    }
}

/// Engine phase.
///
/// ```text
/// Setup -> Idle -> AwaitingSecondPick -> Revealing -> Cooldown -> Idle
///                                                  \-> Handoff -> OpponentThinking -> Revealing
///                                       Cooldown -> LevelComplete -> Idle (next level)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No mode chosen, no board.
    Setup,
    /// Waiting for the side to move to pick a first tile.
    Idle,
    /// One tile face-up.
    AwaitingSecondPick,
    /// Two tiles face-up, judgement pending.
    Revealing,
    /// Pair judged, result on screen.
    Cooldown,
    /// Versus user miss: picks flipped back, opponent about to take over.
    Handoff,
    /// Opponent's turn, choice not yet revealed.
    OpponentThinking,
    /// Every tile matched, next level pending.
    LevelComplete,
}

impl Phase {
    /// True while a resolution sequence is in flight; new selections are ignored.
    pub fn is_processing(&self) -> bool {
        !matches!(
            self,
            Phase::Setup | Phase::Idle | Phase::AwaitingSecondPick
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Idle => "idle",
            Phase::AwaitingSecondPick => "awaiting_second_pick",
            Phase::Revealing => "revealing",
            Phase::Cooldown => "cooldown",
            Phase::Handoff => "handoff",
            Phase::OpponentThinking => "opponent_thinking",
            Phase::LevelComplete => "level_complete",
        }
    }
}

/// Maximum tiles per grid row.
pub const MAX_GRID_COLUMNS: usize = 6;

/// Number of grid columns used to lay out `tile_count` tiles.
///
/// ```
/// use tui_memory_types::grid_columns;
///
/// assert_eq!(grid_columns(4), 2);
/// assert_eq!(grid_columns(6), 3);
/// assert_eq!(grid_columns(20), 6);
/// ```
pub fn grid_columns(tile_count: usize) -> usize {
    tile_count.div_ceil(2).clamp(1, MAX_GRID_COLUMNS)
}

/// Front-end intents produced by the input layer.
///
/// Only `Select` and `ChooseMode` reach the engine; the rest drive the
/// presentation (cursor, screens).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Flip the tile under the cursor
    Select,
    /// Pick a mode on the mode-select screen
    ChooseMode(Mode),
    /// Tear the game down and return to mode select
    BackToMenu,
    /// Dismiss the splash screen early
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_columns_caps_at_six() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(8), 4);
        assert_eq!(grid_columns(12), 6);
        assert_eq!(grid_columns(40), MAX_GRID_COLUMNS);
    }

    #[test]
    fn reference_timing_defaults() {
        assert_eq!(REVEAL_PAUSE_MS, 600);
        assert_eq!(RESULT_PAUSE_MS, 1000);
        assert_eq!(MISS_CLEAR_MS, 800);
        assert_eq!(HANDOFF_MS, 1200);
        assert_eq!(OPPONENT_THINK_MS, 1200);
        assert_eq!(OPPONENT_REVEAL_MS, 700);
        assert_eq!(LEVEL_ADVANCE_MS, 1500);
        assert_eq!(INTRO_MS, 2000);
    }

    #[test]
    fn processing_phases() {
        assert!(!Phase::Setup.is_processing());
        assert!(!Phase::Idle.is_processing());
        assert!(!Phase::AwaitingSecondPick.is_processing());
        assert!(Phase::Revealing.is_processing());
        assert!(Phase::Cooldown.is_processing());
        assert!(Phase::Handoff.is_processing());
        assert!(Phase::OpponentThinking.is_processing());
        assert!(Phase::LevelComplete.is_processing());
    }

    #[test]
    fn side_other_round_trips() {
        assert_eq!(Side::User.other().other(), Side::User);
        assert_eq!(Side::Opponent.as_str(), "opponent");
    }

    #[test]
    fn tiles_match_on_value_only() {
        let a = Tile::new(TileId(0), TileValue(3));
        let b = Tile::new(TileId(5), TileValue(3));
        let c = Tile::new(TileId(1), TileValue(4));
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }
}

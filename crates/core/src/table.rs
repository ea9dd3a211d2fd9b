//! Table module - the complete mutable game state
//!
//! One owned struct holds everything the rules touch: mode, level, board,
//! pending selection, matched set, opponent memory, score and turn. Timing and
//! phase live in the engine; the table only knows what is on it.

use arrayvec::ArrayVec;

use crate::board::{Board, MatchedSet};
use crate::deck::build_board;
use crate::ledger::MemoryLedger;
use crate::level::{self, Level};
use crate::resolver::resolve;
use crate::rng::RandomSource;
use crate::scoring::Score;
use crate::snapshot::{Face, GameSnapshot, TileSnapshot};
use crate::turn::next_turn;
use crate::types::{MatchOutcome, Mode, Side, Tile, TileId};

/// What happened when the pending pair was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub pair: [Tile; 2],
    pub side: Side,
    pub outcome: MatchOutcome,
    /// Turn controller decision, to be applied once the result has been shown.
    pub next_turn: Side,
    pub board_complete: bool,
}

#[derive(Debug, Clone)]
pub struct Table {
    mode: Option<Mode>,
    level: Level,
    board: Board,
    selection: ArrayVec<TileId, 2>,
    matched: MatchedSet,
    ledger: MemoryLedger,
    score: Score,
    turn: Side,
}

impl Table {
    /// An empty table waiting for a mode.
    pub fn new() -> Self {
        Self {
            mode: None,
            level: Level::FIRST,
            board: Board::empty(),
            selection: ArrayVec::new(),
            matched: MatchedSet::new(),
            ledger: MemoryLedger::new(),
            score: Score::default(),
            turn: Side::User,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &[TileId] {
        &self.selection
    }

    pub fn matched(&self) -> &MatchedSet {
        &self.matched
    }

    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn has_board(&self) -> bool {
        !self.board.is_empty()
    }

    pub fn unmatched_count(&self) -> usize {
        self.board.len() - self.matched.len()
    }

    pub fn is_complete(&self) -> bool {
        level::is_complete(&self.board, &self.matched)
    }

    /// Enter `mode` at level 1 with a fresh score.
    pub fn start<R: RandomSource + ?Sized>(&mut self, mode: Mode, rng: &mut R) {
        self.mode = Some(mode);
        self.level = Level::FIRST;
        self.score = Score::default();
        self.rebuild(rng);
    }

    /// Deal a new board for the current level and clear all per-board state.
    pub fn rebuild<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.board = build_board(self.level, rng);
        self.selection.clear();
        self.matched.clear();
        self.ledger.clear();
        self.turn = Side::User;
    }

    /// Move to the next level and deal for it. Score carries over.
    pub fn advance_level<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.level = self.level.next();
        self.rebuild(rng);
    }

    /// Back to the pre-mode state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The turn only changes through the turn controller's decision.
    pub fn set_turn(&mut self, side: Side) {
        if self.mode == Some(Mode::Solo) {
            self.turn = Side::User;
        } else {
            self.turn = side;
        }
    }

    pub fn can_select(&self, id: TileId) -> bool {
        !self.selection.is_full()
            && self.board.contains(id)
            && !self.matched.contains(id)
            && !self.selection.contains(&id)
    }

    /// Add `id` to the pending selection. Invalid picks are ignored.
    pub fn select(&mut self, id: TileId) -> bool {
        if !self.can_select(id) {
            return false;
        }
        self.selection.push(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Judge the pending pair for `side`.
    ///
    /// Returns `None` unless exactly two tiles are selected. The selection
    /// itself stays face-up until [`Table::clear_selection`].
    pub fn resolve_selection(&mut self, side: Side) -> Option<Resolution> {
        let mode = self.mode?;
        if !self.selection.is_full() {
            return None;
        }
        let first = *self.board.get(self.selection[0])?;
        let second = *self.board.get(self.selection[1])?;
        let pair = [first, second];

        let outcome = resolve(
            pair,
            side,
            &mut self.matched,
            &mut self.ledger,
            &mut self.score,
        );

        Some(Resolution {
            pair,
            side,
            outcome,
            next_turn: next_turn(mode, side, outcome, self.unmatched_count()),
            board_complete: self.is_complete(),
        })
    }

    pub fn face_of(&self, id: TileId) -> Face {
        if self.matched.contains(id) {
            Face::Matched
        } else if self.selection.contains(&id) {
            Face::Revealed
        } else {
            Face::Hidden
        }
    }

    /// Fill the table-owned parts of `out`.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.mode = self.mode;
        out.level = self.level.get();
        out.tiles.clear();
        out.tiles.extend(self.board.tiles().iter().map(|tile| {
            let face = self.face_of(tile.id);
            TileSnapshot {
                id: tile.id,
                face,
                value: face.is_up().then_some(tile.value),
            }
        }));
        out.selection.clear();
        out.selection.extend_from_slice(&self.selection);
        out.matched = self.matched.len();
        out.score = self.score;
        out.turn = self.turn;
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

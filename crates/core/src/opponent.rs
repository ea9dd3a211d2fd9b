//! Opponent strategy - recall first, guess otherwise
//!
//! The opponent only knows what the [`MemoryLedger`] holds. If it remembers two
//! face-down tiles with the same value it takes them; the first such pair in
//! ledger order wins, so this branch is fully deterministic. Otherwise it flips
//! two face-down tiles picked uniformly at random.

use crate::board::{Board, MatchedSet};
use crate::ledger::MemoryLedger;
use crate::rng::RandomSource;
use crate::types::TileId;

/// The opponent's pick and how it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Recalled([TileId; 2]),
    Guessed([TileId; 2]),
}

impl Choice {
    pub fn pair(&self) -> [TileId; 2] {
        match self {
            Choice::Recalled(pair) | Choice::Guessed(pair) => *pair,
        }
    }

    pub fn is_recalled(&self) -> bool {
        matches!(self, Choice::Recalled(_))
    }
}

/// First remembered pair of distinct, unmatched ids with equal values.
pub fn recall_pair(ledger: &MemoryLedger, matched: &MatchedSet) -> Option<[TileId; 2]> {
    let entries = ledger.entries();
    for (i, &(a, a_value)) in entries.iter().enumerate() {
        if matched.contains(a) {
            continue;
        }
        for &(b, b_value) in &entries[i + 1..] {
            if a != b && a_value == b_value && !matched.contains(b) {
                return Some([a, b]);
            }
        }
    }
    None
}

/// Two distinct unmatched ids, uniformly at random. `None` with fewer than two.
pub fn guess_pair<R: RandomSource + ?Sized>(
    board: &Board,
    matched: &MatchedSet,
    rng: &mut R,
) -> Option<[TileId; 2]> {
    let candidates: Vec<TileId> = board.unmatched(matched).map(|t| t.id).collect();
    let n = candidates.len() as u32;
    if n < 2 {
        return None;
    }

    let first = rng.next_below(n);
    let mut second = rng.next_below(n - 1);
    if second >= first {
        second += 1;
    }
    Some([candidates[first as usize], candidates[second as usize]])
}

/// The opponent's move for the current board.
///
/// Returns `None` once fewer than two tiles are face-down.
pub fn choose_pair<R: RandomSource + ?Sized>(
    ledger: &MemoryLedger,
    board: &Board,
    matched: &MatchedSet,
    rng: &mut R,
) -> Option<Choice> {
    if board.unmatched(matched).nth(1).is_none() {
        return None;
    }
    if let Some(pair) = recall_pair(ledger, matched) {
        return Some(Choice::Recalled(pair));
    }
    guess_pair(board, matched, rng).map(Choice::Guessed)
}

//! Match resolver - judges two face-up tiles
//!
//! This is the only place the score, the matched set and the memory ledger
//! change during play.

use crate::board::MatchedSet;
use crate::ledger::MemoryLedger;
use crate::scoring::Score;
use crate::types::{MatchOutcome, Side, Tile};

/// Judge `pair` for `side` and apply the consequences.
///
/// - match: both ids join `matched`, `side` scores a point
/// - miss: both `id -> value` entries go into `ledger`, first tile first
pub fn resolve(
    pair: [Tile; 2],
    side: Side,
    matched: &mut MatchedSet,
    ledger: &mut MemoryLedger,
    score: &mut Score,
) -> MatchOutcome {
    let [first, second] = pair;
    if first.matches(&second) {
        matched.insert_pair([first.id, second.id]);
        score.award(side);
        MatchOutcome::Matched
    } else {
        ledger.record(first.id, first.value);
        ledger.record(second.id, second.value);
        MatchOutcome::Missed
    }
}

//! Turn controller
//!
//! Decides who moves next, once per resolved pair. A successful match earns
//! another turn; a miss passes play to the other side. The opponent only keeps
//! its turn while at least one pair is still face-down.

use crate::types::{MatchOutcome, Mode, Side};

/// Side to move after `acting` resolved a pair with `outcome`.
///
/// `unmatched_after` is the number of face-down tiles once the outcome has
/// been applied.
pub fn next_turn(mode: Mode, acting: Side, outcome: MatchOutcome, unmatched_after: usize) -> Side {
    match (mode, outcome, acting) {
        (Mode::Solo, _, _) => Side::User,
        (Mode::Versus, MatchOutcome::Matched, Side::User) => Side::User,
        (Mode::Versus, MatchOutcome::Matched, Side::Opponent) => {
            if unmatched_after >= 2 {
                Side::Opponent
            } else {
                Side::User
            }
        }
        (Mode::Versus, MatchOutcome::Missed, Side::User) => Side::Opponent,
        (Mode::Versus, MatchOutcome::Missed, Side::Opponent) => Side::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solo_always_user() {
        for acting in [Side::User, Side::Opponent] {
            for outcome in [MatchOutcome::Matched, MatchOutcome::Missed] {
                for left in [0, 2, 8] {
                    assert_eq!(next_turn(Mode::Solo, acting, outcome, left), Side::User);
                }
            }
        }
    }

    #[test]
    fn test_versus_match_keeps_turn() {
        assert_eq!(
            next_turn(Mode::Versus, Side::User, MatchOutcome::Matched, 4),
            Side::User
        );
        assert_eq!(
            next_turn(Mode::Versus, Side::User, MatchOutcome::Matched, 0),
            Side::User
        );
        assert_eq!(
            next_turn(Mode::Versus, Side::Opponent, MatchOutcome::Matched, 2),
            Side::Opponent
        );
    }

    #[test]
    fn test_opponent_hands_back_on_empty_board() {
        assert_eq!(
            next_turn(Mode::Versus, Side::Opponent, MatchOutcome::Matched, 0),
            Side::User
        );
    }

    #[test]
    fn test_versus_miss_swaps() {
        assert_eq!(
            next_turn(Mode::Versus, Side::User, MatchOutcome::Missed, 4),
            Side::Opponent
        );
        assert_eq!(
            next_turn(Mode::Versus, Side::Opponent, MatchOutcome::Missed, 4),
            Side::User
        );
    }
}

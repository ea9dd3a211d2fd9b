//! Scoring - one point per matched pair, credited to the side that made it

use serde::Serialize;

use crate::types::Side;

/// Per-side pair count. Never decremented; reset only when the mode is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Score {
    pub user: u32,
    pub opponent: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::User => self.user += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::User => self.user,
            Side::Opponent => self.opponent,
        }
    }

    /// Total pairs matched by both sides.
    pub fn total(&self) -> u32 {
        self.user + self.opponent
    }

    /// Side ahead on points, `None` on a tie.
    pub fn leader(&self) -> Option<Side> {
        match self.user.cmp(&self.opponent) {
            std::cmp::Ordering::Greater => Some(Side::User),
            std::cmp::Ordering::Less => Some(Side::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }
}

//! Engine configuration: pacing and seeding.
//!
//! Defaults come from the timing constants in `types`. Environment variables
//! override them:
//!
//! - `MEMORY_TIME_SCALE`: percentage applied to every pause (default 100)
//! - `MEMORY_SEED`: RNG seed (default 1)

use std::env;

use crate::types::*;

/// Pause lengths in virtual milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub reveal_ms: u32,
    pub result_ms: u32,
    pub miss_clear_ms: u32,
    pub handoff_ms: u32,
    pub opponent_think_ms: u32,
    pub opponent_reveal_ms: u32,
    pub level_advance_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_ms: REVEAL_PAUSE_MS,
            result_ms: RESULT_PAUSE_MS,
            miss_clear_ms: MISS_CLEAR_MS,
            handoff_ms: HANDOFF_MS,
            opponent_think_ms: OPPONENT_THINK_MS,
            opponent_reveal_ms: OPPONENT_REVEAL_MS,
            level_advance_ms: LEVEL_ADVANCE_MS,
        }
    }
}

impl Timings {
    /// Every pause scaled by `percent` (100 = reference pacing, 0 = instant).
    pub fn scaled(percent: u32) -> Self {
        let scale = |ms: u32| ((ms as u64 * percent as u64) / 100).min(u32::MAX as u64) as u32;
        let base = Self::default();
        Self {
            reveal_ms: scale(base.reveal_ms),
            result_ms: scale(base.result_ms),
            miss_clear_ms: scale(base.miss_clear_ms),
            handoff_ms: scale(base.handoff_ms),
            opponent_think_ms: scale(base.opponent_think_ms),
            opponent_reveal_ms: scale(base.opponent_reveal_ms),
            level_advance_ms: scale(base.level_advance_ms),
        }
    }

    /// No pauses at all; continuations run on the next `advance`.
    pub fn instant() -> Self {
        Self::scaled(0)
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let percent = env::var("MEMORY_TIME_SCALE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(100);
        Self::scaled(percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    pub timings: Timings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            timings: Timings::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let seed = env::var("MEMORY_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);

        Self {
            seed,
            timings: Timings::from_env(),
        }
    }
}

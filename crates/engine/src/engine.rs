//! Game engine - owns the game and paces it
//!
//! The engine is the composition root: it owns the [`Table`], the phase, the
//! virtual-clock [`Scheduler`] and both random sources. Every entry point is
//! fire-and-forget; callers observe the result through [`GameEngine::snapshot`]
//! or the drained [`GameEvent`]s.
//!
//! A turn runs as a chain of scheduled continuations:
//!
//! ```text
//! pick, pick ──reveal──▶ Resolve ──result──▶ Settle ──▶ Idle / opponent turn
//!                           │
//!                           ├─(versus user miss) ──miss_clear──▶ ClearMiss ──handoff──▶ HandOff
//!                           └─(board cleared)   ──level_advance──▶ AdvanceLevel
//!
//! opponent turn ──think──▶ OpponentPick (pick, pick) ──opponent_reveal──▶ Resolve ...
//! ```

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::config::{EngineConfig, Timings};
use crate::core::{choose_pair, GameSnapshot, Level, RandomSource, Score, SimpleRng, Table};
use crate::scheduler::Scheduler;
use crate::types::{MatchOutcome, Mode, Phase, Side, TileId, TileValue};

/// Mixed into the seed so the opponent's guesses do not mirror the deal.
const OPPONENT_STREAM: u32 = 0x9E37_79B9;

/// Deferred continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Judge the face-up pair for this side.
    Resolve(Side),
    /// End of the result window; apply the decided turn.
    Settle(Side),
    /// Versus user miss, first stage: flip the picks back.
    ClearMiss,
    /// Versus user miss, second stage: give the opponent its turn.
    HandOff,
    /// Opponent finished thinking; choose and reveal.
    OpponentPick,
    /// Deal the next level.
    AdvanceLevel,
}

/// Observable transitions, drained with [`GameEngine::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ModeChosen { mode: Mode },
    TileRevealed {
        side: Side,
        id: TileId,
        value: TileValue,
    },
    PairMatched {
        side: Side,
        pair: [TileId; 2],
    },
    PairMissed {
        side: Side,
        pair: [TileId; 2],
    },
    TurnChanged { turn: Side },
    LevelAdvanced {
        level: u32,
        tiles: usize,
    },
    Reset,
}

pub struct GameEngine<R = SimpleRng> {
    table: Table,
    phase: Phase,
    scheduler: Scheduler<Task>,
    timings: Timings,
    deck_rng: R,
    opponent_rng: R,
    events: Vec<GameEvent>,
    /// Bumped on every observable transition.
    revision: u64,
}

impl GameEngine<SimpleRng> {
    /// Engine seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_sources(
            config.timings,
            SimpleRng::new(config.seed),
            SimpleRng::new(config.seed ^ OPPONENT_STREAM),
        )
    }
}

impl Default for GameEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Engine with injected random sources for dealing and for the opponent's guesses.
    pub fn with_sources(timings: Timings, deck_rng: R, opponent_rng: R) -> Self {
        Self {
            table: Table::new(),
            phase: Phase::Setup,
            scheduler: Scheduler::new(),
            timings,
            deck_rng,
            opponent_rng,
            events: Vec::new(),
            revision: 0,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<Mode> {
        self.table.mode()
    }

    pub fn level(&self) -> Level {
        self.table.level()
    }

    pub fn turn(&self) -> Side {
        self.table.turn()
    }

    pub fn score(&self) -> Score {
        self.table.score()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Continuations still waiting on the clock.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time at which the next continuation fires.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// True when a user pick would currently be considered.
    pub fn user_can_pick(&self) -> bool {
        self.table.turn() == Side::User
            && matches!(self.phase, Phase::Idle | Phase::AwaitingSecondPick)
    }

    /// Choose the mode and deal level 1. Ignored once a board exists.
    pub fn choose_mode(&mut self, mode: Mode) -> bool {
        if self.phase != Phase::Setup || self.table.has_board() {
            trace!(mode = mode.as_str(), "mode change ignored");
            return false;
        }

        self.table.start(mode, &mut self.deck_rng);
        self.phase = Phase::Idle;
        info!(
            mode = mode.as_str(),
            tiles = self.table.board().len(),
            "mode chosen"
        );
        self.emit(GameEvent::ModeChosen { mode });
        self.touch();
        true
    }

    /// User flips tile `id`.
    ///
    /// Ignored (returns false) before a mode is chosen, outside the user's
    /// turn, while a resolution is in flight, with two tiles already up, or
    /// for unknown, matched or already selected tiles.
    pub fn select_tile(&mut self, id: TileId) -> bool {
        if !self.user_can_pick() {
            trace!(id = id.0, phase = self.phase.as_str(), "pick ignored");
            return false;
        }
        let accepted = self.pick(Side::User, id);
        if !accepted {
            trace!(id = id.0, "pick rejected");
        }
        accepted
    }

    /// Move the virtual clock forward, running every continuation that falls due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due(target) {
            self.run(task);
        }
        self.scheduler.settle_at(target);
    }

    /// Catch the virtual clock up with `clock`.
    pub fn sync<C: Clock + ?Sized>(&mut self, clock: &C) {
        let now = clock.now_ms();
        let current = self.scheduler.now_ms();
        if now > current {
            self.advance(now - current);
        }
    }

    /// Run continuations until nothing is pending. Returns the virtual time spent.
    pub fn advance_until_idle(&mut self) -> u64 {
        let start = self.scheduler.now_ms();
        while let Some(due) = self.scheduler.next_due_ms() {
            let now = self.scheduler.now_ms();
            self.advance(due.saturating_sub(now));
        }
        self.scheduler.now_ms() - start
    }

    /// Tear the game down: cancel every pending continuation and return to
    /// mode selection with a fresh score.
    pub fn reset(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.table.reset();
        self.phase = Phase::Setup;
        debug!(cancelled, "engine reset");
        self.emit(GameEvent::Reset);
        self.touch();
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.table.snapshot_into(out);
        out.phase = self.phase;
        out.processing = self.phase.is_processing();
        out.clock_ms = self.scheduler.now_ms();
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn pick(&mut self, side: Side, id: TileId) -> bool {
        let Some(tile) = self.table.board().get(id).copied() else {
            return false;
        };
        if !self.table.select(id) {
            return false;
        }

        debug!(side = side.as_str(), id = id.0, value = tile.value.0, "tile revealed");
        self.emit(GameEvent::TileRevealed {
            side,
            id,
            value: tile.value,
        });

        if self.table.selection().len() == 2 {
            self.phase = Phase::Revealing;
            let delay = match side {
                Side::User => self.timings.reveal_ms,
                Side::Opponent => self.timings.opponent_reveal_ms,
            };
            self.scheduler.schedule(delay, Task::Resolve(side));
        } else {
            self.phase = Phase::AwaitingSecondPick;
        }
        self.touch();
        true
    }

    fn run(&mut self, task: Task) {
        trace!(?task, now_ms = self.scheduler.now_ms(), "running task");
        match task {
            Task::Resolve(side) => self.on_resolve(side),
            Task::Settle(next) => self.on_settle(next),
            Task::ClearMiss => self.on_clear_miss(),
            Task::HandOff => self.on_hand_off(),
            Task::OpponentPick => self.on_opponent_pick(),
            Task::AdvanceLevel => self.on_advance_level(),
        }
        self.touch();
    }

    fn on_resolve(&mut self, side: Side) {
        let Some(resolution) = self.table.resolve_selection(side) else {
            self.table.clear_selection();
            self.phase = Phase::Idle;
            return;
        };

        let pair = resolution.pair.map(|t| t.id);
        match resolution.outcome {
            MatchOutcome::Matched => {
                debug!(
                    side = side.as_str(),
                    first = pair[0].0,
                    second = pair[1].0,
                    user = self.table.score().user,
                    opponent = self.table.score().opponent,
                    "pair matched"
                );
                self.emit(GameEvent::PairMatched { side, pair });
            }
            MatchOutcome::Missed => {
                debug!(
                    side = side.as_str(),
                    first = pair[0].0,
                    second = pair[1].0,
                    "pair missed"
                );
                self.emit(GameEvent::PairMissed { side, pair });
            }
        }

        self.phase = Phase::Cooldown;
        if resolution.board_complete {
            info!(level = self.table.level().get(), "board cleared");
            self.scheduler
                .schedule(self.timings.level_advance_ms, Task::AdvanceLevel);
        }

        let versus_user_miss = resolution.outcome == MatchOutcome::Missed
            && side == Side::User
            && self.table.mode() == Some(Mode::Versus);
        if versus_user_miss {
            self.scheduler
                .schedule(self.timings.miss_clear_ms, Task::ClearMiss);
        } else {
            self.scheduler
                .schedule(self.timings.result_ms, Task::Settle(resolution.next_turn));
        }
    }

    fn on_settle(&mut self, next: Side) {
        self.table.clear_selection();
        self.change_turn(next);

        if self.table.is_complete() {
            self.phase = Phase::LevelComplete;
        } else if self.table.turn() == Side::Opponent {
            self.begin_opponent_turn();
        } else {
            self.phase = Phase::Idle;
        }
    }

    fn on_clear_miss(&mut self) {
        self.table.clear_selection();
        self.phase = Phase::Handoff;
        self.scheduler.schedule(self.timings.handoff_ms, Task::HandOff);
    }

    fn on_hand_off(&mut self) {
        self.change_turn(Side::Opponent);
        self.begin_opponent_turn();
    }

    fn begin_opponent_turn(&mut self) {
        if self.table.unmatched_count() < 2 {
            self.change_turn(Side::User);
            self.phase = Phase::Idle;
            return;
        }
        self.phase = Phase::OpponentThinking;
        self.scheduler
            .schedule(self.timings.opponent_think_ms, Task::OpponentPick);
    }

    fn on_opponent_pick(&mut self) {
        if self.phase != Phase::OpponentThinking
            || self.table.turn() != Side::Opponent
            || self.table.mode() != Some(Mode::Versus)
        {
            return;
        }

        let choice = choose_pair(
            self.table.ledger(),
            self.table.board(),
            self.table.matched(),
            &mut self.opponent_rng,
        );
        let Some(choice) = choice else {
            self.change_turn(Side::User);
            self.phase = Phase::Idle;
            return;
        };

        let [first, second] = choice.pair();
        debug!(
            recalled = choice.is_recalled(),
            first = first.0,
            second = second.0,
            "opponent chose"
        );
        self.pick(Side::Opponent, first);
        self.pick(Side::Opponent, second);
    }

    fn on_advance_level(&mut self) {
        self.scheduler.cancel_all();
        self.table.advance_level(&mut self.deck_rng);
        self.phase = Phase::Idle;

        let level = self.table.level().get();
        let tiles = self.table.board().len();
        info!(level, tiles, "level advanced");
        self.emit(GameEvent::LevelAdvanced { level, tiles });
    }

    fn change_turn(&mut self, side: Side) {
        if self.table.turn() == side {
            return;
        }
        self.table.set_turn(side);
        if self.table.turn() == side {
            debug!(turn = side.as_str(), "turn changed");
            self.emit(GameEvent::TurnChanged { turn: side });
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReplayRng;

    /// Versus/solo engine with the deal left in id order.
    fn engine(mode: Mode) -> GameEngine<ReplayRng> {
        let mut engine = GameEngine::with_sources(
            Timings::default(),
            ReplayRng::identity(),
            ReplayRng::new(vec![0, 0]),
        );
        assert!(engine.choose_mode(mode));
        engine
    }

    #[test]
    fn test_new_engine_waits_for_mode() {
        let engine = GameEngine::default();
        assert_eq!(engine.phase(), Phase::Setup);
        assert!(engine.mode().is_none());
        assert!(!engine.user_can_pick());
        assert!(engine.snapshot().tiles.is_empty());
    }

    #[test]
    fn test_select_before_mode_is_ignored() {
        let mut engine = GameEngine::default();
        assert!(!engine.select_tile(TileId(0)));
        assert_eq!(engine.revision(), 0);
    }

    #[test]
    fn test_mode_can_only_be_chosen_once() {
        let mut engine = engine(Mode::Solo);
        assert!(!engine.choose_mode(Mode::Versus));
        assert_eq!(engine.mode(), Some(Mode::Solo));
    }

    #[test]
    fn test_second_pick_schedules_resolution_after_reveal_pause() {
        let mut engine = engine(Mode::Versus);
        assert!(engine.select_tile(TileId(0)));
        assert_eq!(engine.phase(), Phase::AwaitingSecondPick);
        assert!(engine.select_tile(TileId(1)));
        assert_eq!(engine.phase(), Phase::Revealing);
        assert!(engine.is_processing());

        engine.advance(599);
        assert_eq!(engine.score().user, 0);
        engine.advance(1);
        assert_eq!(engine.score().user, 1);
        assert_eq!(engine.phase(), Phase::Cooldown);
        assert_eq!(engine.table().selection().len(), 2);

        engine.advance(1000);
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.table().selection().is_empty());
        assert_eq!(engine.turn(), Side::User);
    }

    #[test]
    fn test_picks_while_processing_are_ignored() {
        let mut engine = engine(Mode::Solo);
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(2));
        let before = engine.revision();

        assert!(!engine.select_tile(TileId(1)));
        engine.advance(600);
        assert!(!engine.select_tile(TileId(1)));
        assert_eq!(engine.table().selection(), &[TileId(0), TileId(2)]);
        assert!(engine.revision() > before);
    }

    #[test]
    fn test_reselecting_same_tile_is_noop() {
        let mut engine = engine(Mode::Solo);
        assert!(engine.select_tile(TileId(3)));
        let revision = engine.revision();
        assert!(!engine.select_tile(TileId(3)));
        assert_eq!(engine.table().selection().len(), 1);
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn test_versus_user_miss_hands_off_in_stages() {
        let mut engine = engine(Mode::Versus);
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(2));

        engine.advance(600);
        assert_eq!(engine.phase(), Phase::Cooldown);
        assert_eq!(engine.table().ledger().len(), 2);

        engine.advance(800);
        assert_eq!(engine.phase(), Phase::Handoff);
        assert!(engine.table().selection().is_empty());
        assert_eq!(engine.turn(), Side::User);
        assert!(!engine.select_tile(TileId(1)));

        engine.advance(1200);
        assert_eq!(engine.turn(), Side::Opponent);
        assert_eq!(engine.phase(), Phase::OpponentThinking);
        assert!(!engine.select_tile(TileId(1)));

        engine.advance(1200);
        assert_eq!(engine.phase(), Phase::Revealing);
        assert_eq!(engine.table().selection().len(), 2);
    }

    #[test]
    fn test_solo_miss_keeps_user_turn() {
        let mut engine = engine(Mode::Solo);
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(3));
        engine.advance_until_idle();

        assert_eq!(engine.turn(), Side::User);
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine
            .take_events()
            .iter()
            .all(|e| !matches!(e, GameEvent::TurnChanged { .. })));
    }

    #[test]
    fn test_board_clear_advances_level_after_delay() {
        let mut engine = engine(Mode::Solo);
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(1));
        engine.advance(1600);
        engine.select_tile(TileId(2));
        engine.select_tile(TileId(3));

        engine.advance(600);
        assert_eq!(engine.phase(), Phase::Cooldown);
        engine.advance(1000);
        assert_eq!(engine.phase(), Phase::LevelComplete);
        assert_eq!(engine.level().get(), 1);
        engine.advance(499);
        assert_eq!(engine.level().get(), 1);
        engine.advance(1);
        assert_eq!(engine.level().get(), 2);
        assert_eq!(engine.table().board().len(), 6);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score().user, 2);
    }

    #[test]
    fn test_reset_cancels_pending_work() {
        let mut engine = engine(Mode::Versus);
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(2));
        assert_eq!(engine.pending_tasks(), 1);

        engine.reset();
        assert_eq!(engine.pending_tasks(), 0);
        assert_eq!(engine.phase(), Phase::Setup);
        assert!(!engine.table().has_board());

        engine.advance(10_000);
        assert_eq!(engine.phase(), Phase::Setup);
        assert_eq!(engine.score(), Score::default());
        assert!(engine.choose_mode(Mode::Solo));
    }

    #[test]
    fn test_events_serialize_tagged() {
        let mut engine = engine(Mode::Versus);
        engine.select_tile(TileId(2));
        let events = engine.take_events();
        assert_eq!(events.len(), 2);
        assert!(engine.take_events().is_empty());

        let json = serde_json::to_value(events[1]).unwrap();
        assert_eq!(json["event"], "tile_revealed");
        assert_eq!(json["side"], "user");
        assert_eq!(json["id"], 2);
        assert_eq!(json["value"], 3);
    }

    #[test]
    fn test_sync_follows_clock() {
        use crate::clock::ManualClock;

        let mut engine = engine(Mode::Solo);
        let clock = ManualClock::new();
        engine.select_tile(TileId(0));
        engine.select_tile(TileId(1));

        clock.advance(600);
        engine.sync(&clock);
        assert_eq!(engine.now_ms(), 600);
        assert_eq!(engine.score().user, 1);

        clock.set(100);
        engine.sync(&clock);
        assert_eq!(engine.now_ms(), 600);
    }
}

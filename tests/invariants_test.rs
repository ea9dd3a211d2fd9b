//! Invariants checked over many seeded random games.

use tui_memory::core::{build_board, Face, GameSnapshot, Level, SimpleRng};
use tui_memory::engine::{EngineConfig, GameEngine, GameEvent};
use tui_memory::types::{Mode, Side, TileId};

/// Pairs on every board before `level`.
fn pairs_before(level: u32) -> u32 {
    (1..level).map(|l| l + 1).sum()
}

fn check(snap: &GameSnapshot, prev: &GameSnapshot) {
    assert!(snap.selection.len() <= 2);
    if snap.user_can_pick() {
        assert_eq!(snap.turn, Side::User);
        assert!(!snap.processing);
    }
    assert_eq!(snap.processing, snap.phase.is_processing());
    assert_eq!(snap.matched % 2, 0);
    assert!(snap.score.user >= prev.score.user);
    assert!(snap.score.opponent >= prev.score.opponent);
    if snap.level == prev.level {
        assert!(snap.matched >= prev.matched);
    }
    assert_eq!(
        snap.score.total(),
        pairs_before(snap.level) + snap.matched as u32 / 2
    );
    for tile in &snap.tiles {
        assert_eq!(tile.value.is_some(), tile.face != Face::Hidden);
    }
    if snap.mode == Some(Mode::Solo) {
        assert_eq!(snap.turn, Side::User);
        assert_eq!(snap.score.opponent, 0);
    }
}

/// Play `levels` levels with a random user, checking invariants after every step.
fn play(seed: u32, mode: Mode, levels: u32) {
    let mut engine = GameEngine::new(EngineConfig::with_seed(seed));
    let mut user = SimpleRng::new(seed.wrapping_mul(31).wrapping_add(7));
    engine.choose_mode(mode);

    let mut prev = engine.snapshot();
    let mut steps = 0;
    while engine.level().get() <= levels {
        steps += 1;
        assert!(steps < 20_000, "seed {seed}: game did not progress");

        assert_eq!(prev.user_can_pick(), engine.user_can_pick());
        if prev.user_can_pick() {
            let hidden: Vec<TileId> = prev
                .tiles
                .iter()
                .filter(|t| t.face == Face::Hidden)
                .map(|t| t.id)
                .collect();
            let id = hidden[(user.next_u32() as usize) % hidden.len()];
            assert!(engine.select_tile(id));
        } else {
            let due = engine.next_due_ms().expect("engine stalled");
            engine.advance(due - engine.now_ms());
        }

        let snap = engine.snapshot();
        check(&snap, &prev);
        prev = snap;
    }

    if mode == Mode::Solo {
        let events = engine.take_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnChanged { turn: Side::Opponent })));
    }
}

#[test]
fn random_versus_games_hold_invariants() {
    for seed in 1..=40 {
        play(seed, Mode::Versus, 3);
    }
}

#[test]
fn random_solo_games_hold_invariants() {
    for seed in 1..=40 {
        play(seed, Mode::Solo, 3);
    }
}

#[test]
fn every_level_deals_each_value_twice() {
    let mut rng = SimpleRng::new(99);
    let mut level = Level::FIRST;
    for _ in 0..20 {
        let board = build_board(level, &mut rng);
        let l = level.get();
        assert_eq!(board.len() as u32, 2 * (l + 1));

        let mut values: Vec<u32> = board.tiles().iter().map(|t| t.value.0).collect();
        values.sort_unstable();
        let expected: Vec<u32> = (2..=l + 2).flat_map(|v| [v, v]).collect();
        assert_eq!(values, expected);

        level = level.next();
    }
}

//! End-to-end game scenarios on the virtual clock.

use tui_memory::core::{Face, ReplayRng};
use tui_memory::engine::{EngineConfig, GameEngine, GameEvent, Timings};
use tui_memory::types::{Mode, Phase, Side, TileId, TileValue};

/// Engine whose deal keeps ids in order: ids 2k and 2k+1 hold value k+2.
fn ordered(mode: Mode, opponent_script: Vec<u32>) -> GameEngine<ReplayRng> {
    let mut engine = GameEngine::with_sources(
        Timings::default(),
        ReplayRng::identity(),
        ReplayRng::new(opponent_script),
    );
    assert!(engine.choose_mode(mode));
    engine
}

fn pick_pair<R: tui_memory::core::RandomSource>(engine: &mut GameEngine<R>, a: u32, b: u32) {
    assert!(engine.select_tile(TileId(a)), "pick {a} rejected");
    assert!(engine.select_tile(TileId(b)), "pick {b} rejected");
}

#[test]
fn user_clears_first_level_in_versus() {
    let mut engine = ordered(Mode::Versus, vec![0]);
    let values: Vec<u32> = engine
        .table()
        .board()
        .tiles()
        .iter()
        .map(|t| t.value.0)
        .collect();
    assert_eq!(values, vec![2, 2, 3, 3]);

    pick_pair(&mut engine, 0, 1);
    engine.advance_until_idle();
    assert_eq!(engine.turn(), Side::User);
    assert_eq!(engine.score().user, 1);

    pick_pair(&mut engine, 2, 3);
    engine.advance(600 + 1000);
    assert_eq!(engine.phase(), Phase::LevelComplete);
    assert_eq!(engine.level().get(), 1);

    engine.advance(500);
    assert_eq!(engine.level().get(), 2);
    assert_eq!(engine.table().board().len(), 6);
    assert_eq!(engine.score().user, 2);
    assert_eq!(engine.score().opponent, 0);
    assert_eq!(engine.turn(), Side::User);
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn user_miss_records_ledger_and_hands_turn_to_opponent() {
    // Opponent guesses ids 0 and 1 from the four face-down tiles.
    let mut engine = ordered(Mode::Versus, vec![0, 0]);

    pick_pair(&mut engine, 0, 2);
    engine.advance(600);
    assert_eq!(
        engine.table().ledger().entries(),
        &[(TileId(0), TileValue(2)), (TileId(2), TileValue(3))]
    );

    engine.advance(800 + 1200);
    assert_eq!(engine.turn(), Side::Opponent);
    assert_eq!(engine.phase(), Phase::OpponentThinking);

    engine.advance(1200);
    let snap = engine.snapshot();
    assert_eq!(snap.selection, vec![TileId(0), TileId(1)]);
    assert!(snap.selection.iter().all(|&id| snap.tile(id).is_some_and(|t| t.face == Face::Revealed)));

    engine.advance(700);
    assert_eq!(engine.score().opponent, 1);

    // Two tiles left: the opponent keeps the turn and takes them too.
    engine.advance_until_idle();
    assert_eq!(engine.score().opponent, 2);
    assert_eq!(engine.level().get(), 2);
    assert_eq!(engine.turn(), Side::User);
}

#[test]
fn opponent_recalls_remembered_pairs() {
    // First guess flips ids 1 and 2 (a miss).
    let mut engine = ordered(Mode::Versus, vec![1, 1]);

    pick_pair(&mut engine, 0, 2);
    engine.advance_until_idle();
    assert_eq!(engine.turn(), Side::User);
    assert_eq!(engine.score().opponent, 0);
    assert_eq!(
        engine.table().ledger().entries(),
        &[
            (TileId(0), TileValue(2)),
            (TileId(2), TileValue(3)),
            (TileId(1), TileValue(2)),
        ]
    );
    engine.take_events();

    pick_pair(&mut engine, 0, 3);
    engine.advance_until_idle();

    let matched: Vec<_> = engine
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PairMatched { side, pair } => Some((side, pair)),
            _ => None,
        })
        .collect();
    assert_eq!(
        matched,
        vec![
            (Side::Opponent, [TileId(0), TileId(1)]),
            (Side::Opponent, [TileId(2), TileId(3)]),
        ]
    );
    assert_eq!(engine.score().opponent, 2);
    assert_eq!(engine.score().user, 0);
    assert_eq!(engine.level().get(), 2);
}

#[test]
fn solo_miss_keeps_the_user_playing() {
    let mut engine = ordered(Mode::Solo, vec![0]);
    pick_pair(&mut engine, 1, 2);
    engine.advance_until_idle();

    assert_eq!(engine.turn(), Side::User);
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.score().opponent, 0);
    assert!(engine.user_can_pick());
}

#[test]
fn picks_out_of_turn_are_ignored() {
    let mut engine = ordered(Mode::Versus, vec![0, 0]);
    pick_pair(&mut engine, 0, 2);
    engine.advance(600 + 800 + 1200);
    assert_eq!(engine.turn(), Side::Opponent);

    let revision = engine.revision();
    assert!(!engine.select_tile(TileId(3)));
    assert_eq!(engine.revision(), revision);
    assert!(engine.table().selection().is_empty());
}

#[test]
fn reset_mid_turn_returns_to_mode_select() {
    let mut engine = ordered(Mode::Versus, vec![0, 0]);
    pick_pair(&mut engine, 0, 2);
    engine.advance(600 + 800);
    assert_eq!(engine.phase(), Phase::Handoff);

    engine.reset();
    assert_eq!(engine.pending_tasks(), 0);
    assert_eq!(engine.phase(), Phase::Setup);
    assert_eq!(engine.mode(), None);
    assert_eq!(engine.level().get(), 1);
    assert!(engine.snapshot().tiles.is_empty());

    engine.advance(60_000);
    assert_eq!(engine.turn(), Side::User);
    assert_eq!(engine.phase(), Phase::Setup);
    assert!(engine.take_events().contains(&GameEvent::Reset));
}

#[test]
fn same_seed_deals_same_board() {
    let config = EngineConfig::with_seed(2024);
    let mut a = GameEngine::new(config);
    let mut b = GameEngine::new(config);
    a.choose_mode(Mode::Solo);
    b.choose_mode(Mode::Versus);
    assert_eq!(a.table().board(), b.table().board());

    let mut c = GameEngine::new(EngineConfig::with_seed(2025));
    c.choose_mode(Mode::Solo);
    let mut d = GameEngine::new(EngineConfig::with_seed(2025));
    d.choose_mode(Mode::Solo);
    assert_eq!(c.table().board(), d.table().board());
}

#[test]
fn instant_timings_run_on_next_advance() {
    let mut engine = GameEngine::new(EngineConfig::with_seed(5).with_timings(Timings::instant()));
    engine.choose_mode(Mode::Solo);
    let ids: Vec<TileId> = engine.snapshot().tiles.iter().map(|t| t.id).collect();
    pick_pair(&mut engine, ids[0].0, ids[1].0);
    assert_eq!(engine.phase(), Phase::Revealing);

    engine.advance(0);
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.now_ms(), 0);
}

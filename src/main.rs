//! Terminal memory game runner (default binary).
//!
//! Splash, mode select, then the board. The engine runs on a virtual clock
//! that is caught up with wall-clock time once per frame.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_memory::cli::{init_tracing, GameArgs, LogTarget};
use tui_memory::core::GameSnapshot;
use tui_memory::engine::{Clock, GameEngine, MonotonicClock};
use tui_memory::input::{handle_key_event, should_quit, GridCursor};
use tui_memory::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};
use tui_memory::types::{UiAction, INTRO_MS};

/// Upper bound on how long a frame waits for input.
const FRAME_MS: u64 = 50;

#[derive(Parser, Debug)]
#[command(name = "tui-memory", about = "Find the pairs, alone or against the opponent")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(LogTarget::EnvFile)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli.game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Front-end state that the engine does not own.
struct App {
    screen: Screen,
    cursor: GridCursor,
}

fn run(term: &mut TerminalRenderer, args: &GameArgs) -> Result<()> {
    let config = args.engine_config();
    info!(seed = config.seed, "starting");

    let mut engine = GameEngine::new(config);
    let clock = MonotonicClock::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut app = App {
        screen: Screen::Intro,
        cursor: GridCursor::new(),
    };

    if let Some(mode) = args.mode {
        engine.choose_mode(mode);
        app.screen = Screen::Board { cursor: 0 };
    }

    loop {
        engine.sync(&clock);
        engine.snapshot_into(&mut snap);

        if app.screen == Screen::Intro && clock.now_ms() >= INTRO_MS as u64 {
            app.screen = Screen::ModeSelect;
        }
        if let Screen::Board { .. } = app.screen {
            app.cursor.clamp(snap.tiles.len());
            app.screen = Screen::Board {
                cursor: app.cursor.index(),
            };
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(app.screen, &snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let wait = engine
            .next_due_ms()
            .map_or(FRAME_MS, |due| due.saturating_sub(engine.now_ms()))
            .clamp(1, FRAME_MS);
        if !event::poll(Duration::from_millis(wait))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(action) => on_action(&mut app, &mut engine, &snap, action),
                    None if app.screen == Screen::Intro => app.screen = Screen::ModeSelect,
                    None => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn on_action(app: &mut App, engine: &mut GameEngine, snap: &GameSnapshot, action: UiAction) {
    match (app.screen, action) {
        (Screen::Intro, _) => app.screen = Screen::ModeSelect,
        (Screen::ModeSelect, UiAction::ChooseMode(mode)) => {
            if engine.choose_mode(mode) {
                app.cursor.reset();
                app.screen = Screen::Board { cursor: 0 };
            }
        }
        (Screen::Board { .. }, UiAction::Select) if snap.user_can_pick() => {
            if let Some(tile) = snap.tiles.get(app.cursor.index()) {
                engine.select_tile(tile.id);
            }
        }
        (Screen::Board { .. }, UiAction::Select) => {}
        (Screen::Board { .. }, UiAction::BackToMenu) => {
            engine.reset();
            app.screen = Screen::ModeSelect;
        }
        (Screen::Board { .. }, _) => {
            app.cursor.apply(action, snap.tiles.len());
        }
        _ => {}
    }
}

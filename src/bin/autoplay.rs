//! Headless runner: a random scripted user plays on the virtual clock.
//!
//! Prints one JSON object per observable change to stdout (snapshot plus the
//! events that led to it). Logs go to stderr.

use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use tui_memory::cli::{init_tracing, GameArgs, LogTarget};
use tui_memory::core::{Face, GameSnapshot};
use tui_memory::engine::{GameEngine, GameEvent};
use tui_memory::types::{Mode, TileId};

#[derive(Parser, Debug)]
#[command(name = "autoplay", about = "Play the memory game headlessly and print JSON lines")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,
    /// Stop once this many levels have been cleared.
    #[arg(long, default_value_t = 2)]
    levels: u32,
    /// Hard cap on user picks.
    #[arg(long, default_value_t = 10_000)]
    max_picks: u32,
}

#[derive(Serialize)]
struct Frame<'a> {
    events: &'a [GameEvent],
    snapshot: &'a GameSnapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(LogTarget::Stderr)?;

    let config = cli.game.engine_config();
    let mode = cli.game.mode.unwrap_or(Mode::Versus);
    info!(seed = config.seed, mode = mode.as_str(), levels = cli.levels, "autoplay");

    let mut engine = GameEngine::new(config);
    let mut user = StdRng::seed_from_u64(config.seed as u64);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut snap = GameSnapshot::default();
    let mut last_revision = None;
    let mut picks = 0;

    engine.choose_mode(mode);

    while engine.level().get() <= cli.levels {
        engine.snapshot_into(&mut snap);
        if last_revision != Some(snap.revision) {
            last_revision = Some(snap.revision);
            let events = engine.take_events();
            write_frame(&mut out, &events, &snap)?;
        }

        if snap.user_can_pick() {
            if picks >= cli.max_picks {
                warn!(picks, "pick limit reached");
                break;
            }
            let hidden: Vec<TileId> = snap
                .tiles
                .iter()
                .filter(|t| t.face == Face::Hidden)
                .map(|t| t.id)
                .collect();
            if let Some(&id) = hidden.choose(&mut user) {
                engine.select_tile(id);
                picks += 1;
            }
        } else if let Some(due) = engine.next_due_ms() {
            engine.advance(due.saturating_sub(engine.now_ms()));
        } else {
            warn!(phase = engine.phase().as_str(), "nothing scheduled and no pick possible");
            break;
        }
    }

    let score = engine.score();
    info!(
        levels = engine.level().get() - 1,
        user = score.user,
        opponent = score.opponent,
        leader = score.leader().map_or("tie", |side| side.as_str()),
        picks,
        virtual_ms = engine.now_ms(),
        "done"
    );
    out.flush()?;
    Ok(())
}

fn write_frame(out: &mut impl Write, events: &[GameEvent], snapshot: &GameSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, &Frame { events, snapshot })?;
    writeln!(out)?;
    Ok(())
}

//! Command-line and logging setup shared by the binaries.

use std::env;
use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Args;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::engine::{EngineConfig, Timings};
use crate::types::Mode;

/// Options common to the interactive and headless runners.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// RNG seed. Falls back to MEMORY_SEED, then to a random seed.
    #[arg(long)]
    pub seed: Option<u32>,
    /// Start directly in this mode (solo | versus).
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,
    /// Pause length in percent of the reference pacing. Falls back to MEMORY_TIME_SCALE.
    #[arg(long)]
    pub time_scale: Option<u32>,
}

impl GameArgs {
    /// Flags over environment over defaults.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        match self.seed {
            Some(seed) => config.seed = seed,
            None if env::var_os("MEMORY_SEED").is_none() => config.seed = rand::random(),
            None => {}
        }
        if let Some(percent) = self.time_scale {
            config.timings = Timings::scaled(percent);
        }
        config
    }
}

pub fn parse_mode(s: &str) -> std::result::Result<Mode, String> {
    Mode::from_str(s).ok_or_else(|| format!("unknown mode `{s}` (expected solo or versus)"))
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The file named by MEMORY_LOG_PATH, or nowhere if unset.
    /// The interactive binary owns the terminal, so it never logs to it.
    EnvFile,
    Stderr,
}

/// Install the global subscriber. Filter comes from MEMORY_LOG (default `info`).
pub fn init_tracing(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env("MEMORY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .try_init()?,
        LogTarget::EnvFile => {
            let Some(path) = env::var_os("MEMORY_LOG_PATH") else {
                return Ok(());
            };
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?
        }
    }
    Ok(())
}

use serde::Serialize;

use crate::scoring::Score;
use crate::types::{Mode, Phase, Side, TileId, TileValue};

/// How a tile is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Hidden,
    /// Face-up as part of the pending selection.
    Revealed,
    Matched,
}

impl Face {
    pub fn is_up(&self) -> bool {
        !matches!(self, Face::Hidden)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub face: Face,
    /// Only present while the tile is face-up.
    pub value: Option<TileValue>,
}

/// Read-only view of the engine for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub mode: Option<Mode>,
    pub level: u32,
    /// Tiles in display order.
    pub tiles: Vec<TileSnapshot>,
    pub selection: Vec<TileId>,
    pub matched: usize,
    pub score: Score,
    pub turn: Side,
    pub phase: Phase,
    pub processing: bool,
    pub clock_ms: u64,
    pub revision: u64,
}

impl GameSnapshot {
    pub fn tile(&self, id: TileId) -> Option<&TileSnapshot> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// True when a user pick would currently be considered.
    pub fn user_can_pick(&self) -> bool {
        self.turn == Side::User && matches!(self.phase, Phase::Idle | Phase::AwaitingSecondPick)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            mode: None,
            level: 1,
            tiles: Vec::new(),
            selection: Vec::new(),
            matched: 0,
            score: Score::default(),
            turn: Side::User,
            phase: Phase::Setup,
            processing: false,
            clock_ms: 0,
            revision: 0,
        }
    }
}

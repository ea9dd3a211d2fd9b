//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Face, GameSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{grid_columns, Mode, Phase, Side};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Which screen the front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    ModeSelect,
    /// The board, with the cursor on the tile at this display index.
    Board { cursor: usize },
}

const BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG);
const TITLE: CellStyle = CellStyle::new(Rgb::new(240, 200, 90), BG).bold();
const HINT: CellStyle = CellStyle::new(Rgb::new(140, 140, 150), BG).dim();
const ACTIVE: CellStyle = CellStyle::new(Rgb::new(120, 220, 250), BG).bold();

const HIDDEN_BORDER: CellStyle = CellStyle::new(Rgb::new(110, 110, 130), BG);
const HIDDEN_FILL: CellStyle = CellStyle::new(Rgb::new(90, 90, 120), Rgb::new(25, 25, 35));
const UP_BORDER: CellStyle = CellStyle::new(Rgb::new(120, 220, 250), BG).bold();
const UP_FACE: CellStyle = CellStyle::new(Rgb::new(250, 250, 250), Rgb::new(20, 40, 60)).bold();
const MATCHED_BORDER: CellStyle = CellStyle::new(Rgb::new(90, 200, 110), BG).dim();
const MATCHED_FACE: CellStyle = CellStyle::new(Rgb::new(120, 220, 140), Rgb::new(15, 35, 20));
const CURSOR: CellStyle = CellStyle::new(Rgb::new(250, 220, 60), BG).bold();

/// Dot slots inside a tile face, as (column, row) in a 3x3 grid.
const DOT_SLOTS: [(u16, u16); 9] = [
    (0, 0),
    (2, 2),
    (2, 0),
    (0, 2),
    (1, 1),
    (0, 1),
    (2, 1),
    (1, 0),
    (1, 2),
];

/// Where the tile grid goes for one frame.
///
/// Tiles shrink to a compact size when the full-size grid does not fit
/// between the status lines and the hint line. If even compact tiles do not
/// fit, only a band of rows around the cursor is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub tile_w: u16,
    pub tile_h: u16,
    left: u16,
    gap: u16,
    cols: usize,
    rows: usize,
    first_row: usize,
    visible_rows: usize,
}

impl BoardLayout {
    /// Top-left corner of the tile at display index `index`, or `None` when
    /// its row is scrolled out of view.
    pub fn tile_origin(&self, index: usize) -> Option<(u16, u16)> {
        let (row, col) = (index / self.cols, index % self.cols);
        if row < self.first_row || row >= self.first_row + self.visible_rows {
            return None;
        }
        let row = (row - self.first_row) as u16;
        Some((
            self.left + col as u16 * (self.tile_w + self.gap),
            BOARD_TOP + row * self.tile_h,
        ))
    }

    pub fn rows_above(&self) -> usize {
        self.first_row
    }

    pub fn rows_below(&self) -> usize {
        self.rows.saturating_sub(self.first_row + self.visible_rows)
    }
}

/// Terminal renderer for the memory game.
pub struct GameView {
    /// Tile width in columns, border included.
    tile_w: u16,
    /// Tile height in rows, border included.
    tile_h: u16,
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            tile_w: 7,
            tile_h: 5,
            gap: 1,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(3),
            tile_h: tile_h.max(3),
            gap: 1,
        }
    }

    /// Render `screen` into an existing framebuffer.
    ///
    /// Callers keep one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(
        &self,
        screen: Screen,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.cell(' '));

        match screen {
            Screen::Intro => self.draw_intro(fb),
            Screen::ModeSelect => self.draw_mode_select(fb),
            Screen::Board { cursor } => self.draw_board(fb, snap, cursor),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: Screen, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, snap, viewport, &mut fb);
        fb
    }

    /// Lay out `tile_count` tiles in `viewport`, keeping `cursor` visible.
    pub fn layout(&self, tile_count: usize, cursor: usize, viewport: Viewport) -> BoardLayout {
        let cols = grid_columns(tile_count);
        let rows = tile_count.div_ceil(cols).max(1);
        let avail_h = viewport.height.saturating_sub(BOARD_TOP + 1);
        let board_w = |tile_w: u16| cols as u16 * (tile_w + self.gap) - self.gap;

        let compact = (self.tile_w.min(COMPACT_W), self.tile_h.min(COMPACT_H));
        let (tile_w, tile_h) = [(self.tile_w, self.tile_h), compact]
            .into_iter()
            .find(|&(w, h)| rows as u16 * h <= avail_h && board_w(w) <= viewport.width)
            .unwrap_or(compact);

        let visible_rows = ((avail_h / tile_h) as usize).clamp(1, rows);
        let cursor_row = cursor.min(tile_count.saturating_sub(1)) / cols;
        let first_row = (cursor_row + 1).saturating_sub(visible_rows);

        BoardLayout {
            tile_w,
            tile_h,
            left: viewport.width.saturating_sub(board_w(tile_w)) / 2,
            gap: self.gap,
            cols,
            rows,
            first_row,
            visible_rows,
        }
    }

    fn draw_intro(&self, fb: &mut FrameBuffer) {
        let mid = fb.height() / 2;
        fb.put_str_centered(mid.saturating_sub(2), "M E M O R Y", TITLE);
        fb.put_str_centered(mid, "Flip two tiles. Find the pairs.", TEXT);
        fb.put_str_centered(mid + 2, "press any key", HINT);
    }

    fn draw_mode_select(&self, fb: &mut FrameBuffer) {
        let mid = fb.height() / 2;
        fb.put_str_centered(mid.saturating_sub(3), "CHOOSE A MODE", TITLE);
        fb.put_str_centered(mid.saturating_sub(1), "1  Solo     ", TEXT);
        fb.put_str_centered(mid, "2  Versus   ", TEXT);
        fb.put_str_centered(mid + 2, "q  quit", HINT);
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, cursor: usize) {
        let vp = Viewport::new(fb.width(), fb.height());

        let x = fb.width().saturating_sub(6 + digits(snap.level)) / 2;
        let x = fb.put_str(x, 0, "LEVEL ", TITLE);
        fb.put_u32(x, 0, snap.level, TITLE);

        if snap.mode == Some(Mode::Versus) {
            self.draw_score_line(fb, snap, 1);
        }
        fb.put_str_centered(2, status_line(snap), TEXT);

        let layout = self.layout(snap.tiles.len(), cursor, vp);
        for (i, tile) in snap.tiles.iter().enumerate() {
            if let Some((x, y)) = layout.tile_origin(i) {
                draw_tile(fb, &layout, x, y, tile, i == cursor);
            }
        }
        let more = match (layout.rows_above() > 0, layout.rows_below() > 0) {
            (true, true) => Some("more rows above and below"),
            (true, false) => Some("more rows above"),
            (false, true) => Some("more rows below"),
            (false, false) => None,
        };
        if let Some(more) = more {
            fb.put_str_centered(BOARD_TOP - 1, more, HINT);
        }

        fb.put_str_centered(
            fb.height().saturating_sub(1),
            "arrows move  enter flip  r menu  q quit",
            HINT,
        );
    }

    fn draw_score_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, y: u16) {
        let (user, opponent) = (snap.score.of(Side::User), snap.score.of(Side::Opponent));
        let width = 4 + digits(user) + 3 + 9 + digits(opponent);
        let (user_style, opponent_style) = match snap.turn {
            Side::User => (ACTIVE, TEXT),
            Side::Opponent => (TEXT, ACTIVE),
        };

        let x = fb.width().saturating_sub(width) / 2;
        let x = fb.put_str(x, y, "YOU ", user_style);
        let x = fb.put_u32(x, y, user, user_style);
        let x = fb.put_str(x, y, "   ", TEXT);
        let x = fb.put_str(x, y, "OPPONENT ", opponent_style);
        fb.put_u32(x, y, opponent, opponent_style);
    }
}

fn draw_tile(
    fb: &mut FrameBuffer,
    layout: &BoardLayout,
    x: u16,
    y: u16,
    tile: &TileSnapshot,
    focused: bool,
) {
    let (border, face, fill) = match tile.face {
        Face::Hidden => (HIDDEN_BORDER, HIDDEN_FILL, '░'),
        Face::Revealed => (UP_BORDER, UP_FACE, ' '),
        Face::Matched => (MATCHED_BORDER, MATCHED_FACE, ' '),
    };
    let border = if focused { CURSOR } else { border };

    let (inner_w, inner_h) = (layout.tile_w - 2, layout.tile_h - 2);
    fb.draw_box(x, y, layout.tile_w, layout.tile_h, border);
    fb.fill_rect(x + 1, y + 1, inner_w, inner_h, fill, face);

    if let Some(value) = tile.value {
        draw_value(fb, x + 1, y + 1, inner_w, inner_h, value.0, face);
    }
}

/// Dots for small values, the number itself otherwise.
fn draw_value(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    inner_w: u16,
    inner_h: u16,
    value: u32,
    style: CellStyle,
) {
    let fits_dots = inner_w >= 5 && inner_h >= 3;

    if fits_dots && value as usize <= DOT_SLOTS.len() {
        let dx = (inner_w - 5) / 2;
        let dy = (inner_h - 3) / 2;
        for &(col, row) in &DOT_SLOTS[..value as usize] {
            fb.put_char(x + dx + col * 2, y + dy + row, '●', style);
        }
    } else {
        let w = digits(value);
        fb.put_u32(x + inner_w.saturating_sub(w) / 2, y + inner_h / 2, value, style);
    }
}

/// First row of the tile grid.
const BOARD_TOP: u16 = 4;

/// Tile size used when the full-size grid does not fit.
const COMPACT_W: u16 = 5;
const COMPACT_H: u16 = 3;

fn status_line(snap: &GameSnapshot) -> &'static str {
    let versus = snap.mode == Some(Mode::Versus);
    match snap.phase {
        Phase::Setup => "Choose a mode",
        Phase::Idle if versus => "Your turn",
        Phase::Idle => "Find the pairs",
        Phase::AwaitingSecondPick => "Pick another tile",
        Phase::Revealing if snap.turn == Side::Opponent => "Opponent flips...",
        Phase::Revealing => "...",
        Phase::Cooldown if selection_matched(snap) => "Match!",
        Phase::Cooldown => "No match",
        Phase::Handoff => "Opponent's turn",
        Phase::OpponentThinking => "Opponent is thinking...",
        Phase::LevelComplete => "Level complete!",
    }
}

fn selection_matched(snap: &GameSnapshot) -> bool {
    !snap.selection.is_empty()
        && snap
            .selection
            .iter()
            .all(|&id| snap.tile(id).is_some_and(|t| t.face == Face::Matched))
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

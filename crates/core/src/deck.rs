//! Deck builder - deals a shuffled board for a level
//!
//! Values are laid out pairwise in ascending order and ids are assigned in that
//! order before shuffling, so tile ids `2k` and `2k + 1` always carry value
//! `k + 2`. Only the display order depends on the random source.

use crate::board::Board;
use crate::level::Level;
use crate::rng::{shuffle, RandomSource};
use crate::types::{Tile, TileId, TileValue};

/// Tiles for `level` before shuffling.
pub fn ordered_tiles(level: Level) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(level.tile_count());
    for value in level.values() {
        for _ in 0..2 {
            let id = TileId(tiles.len() as u32);
            tiles.push(Tile::new(id, TileValue(value)));
        }
    }
    tiles
}

/// Deal a new shuffled board for `level`.
pub fn build_board<R: RandomSource + ?Sized>(level: Level, rng: &mut R) -> Board {
    let mut tiles = ordered_tiles(level);
    shuffle(rng, &mut tiles);
    Board::from_tiles(tiles)
}

//! Board module - the dealt tiles and the set of matched ids
//!
//! The board is an ordered sequence of tiles (display order). Tile ids are
//! stable for the lifetime of one board and are what every other component
//! refers to; the position of a tile only matters to the renderer.

use crate::types::{Tile, TileId};

/// Ordered collection of the tiles dealt for the current level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// An empty board (no mode chosen yet).
    pub fn empty() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id.
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// Tiles not yet matched, in display order.
    pub fn unmatched<'a>(&'a self, matched: &'a MatchedSet) -> impl Iterator<Item = &'a Tile> + 'a {
        self.tiles.iter().filter(move |t| !matched.contains(t.id))
    }
}

/// Ids permanently face-up. Grows two at a time within a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedSet {
    ids: Vec<TileId>,
}

impl MatchedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.ids.contains(&id)
    }

    /// Record a matched pair. Ids already present are not duplicated.
    pub fn insert_pair(&mut self, pair: [TileId; 2]) {
        for id in pair {
            if !self.contains(id) {
                self.ids.push(id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Matched ids in the order they were matched.
    pub fn ids(&self) -> &[TileId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileValue;

    fn sample_board() -> Board {
        Board::from_tiles(vec![
            Tile::new(TileId(2), TileValue(3)),
            Tile::new(TileId(0), TileValue(2)),
            Tile::new(TileId(3), TileValue(3)),
            Tile::new(TileId(1), TileValue(2)),
        ])
    }

    #[test]
    fn test_lookup_by_id_ignores_position() {
        let board = sample_board();
        assert_eq!(board.get(TileId(0)).unwrap().value, TileValue(2));
        assert_eq!(board.tiles()[1].id, TileId(0));
        assert!(board.get(TileId(9)).is_none());
        assert!(!board.contains(TileId(4)));
    }

    #[test]
    fn test_unmatched_filters_in_display_order() {
        let board = sample_board();
        let mut matched = MatchedSet::new();
        matched.insert_pair([TileId(0), TileId(1)]);

        let ids: Vec<TileId> = board.unmatched(&matched).map(|t| t.id).collect();
        assert_eq!(ids, vec![TileId(2), TileId(3)]);
    }

    #[test]
    fn test_matched_set_does_not_duplicate() {
        let mut matched = MatchedSet::new();
        matched.insert_pair([TileId(4), TileId(5)]);
        matched.insert_pair([TileId(4), TileId(5)]);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched.ids(), &[TileId(4), TileId(5)]);

        matched.clear();
        assert!(matched.is_empty());
    }
}

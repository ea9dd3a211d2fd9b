//! Memory ledger - what the opponent remembers
//!
//! Only tiles revealed in a failed attempt are recorded. Entries keep their
//! first insertion position even when re-recorded, and entries for tiles that
//! are matched later are left in place: readers must skip them.

use crate::types::{TileId, TileValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    entries: Vec<(TileId, TileValue)>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `id -> value`, overwriting a previous entry for `id` in place.
    pub fn record(&mut self, id: TileId, value: TileValue) {
        match self.entries.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: TileId) -> Option<TileValue> {
        self.entries
            .iter()
            .find(|(known, _)| *known == id)
            .map(|&(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(TileId, TileValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut ledger = MemoryLedger::new();
        ledger.record(TileId(4), TileValue(3));
        ledger.record(TileId(1), TileValue(2));
        assert_eq!(
            ledger.entries(),
            &[(TileId(4), TileValue(3)), (TileId(1), TileValue(2))]
        );
    }

    #[test]
    fn test_rerecord_overwrites_in_place() {
        let mut ledger = MemoryLedger::new();
        ledger.record(TileId(4), TileValue(3));
        ledger.record(TileId(1), TileValue(2));
        ledger.record(TileId(4), TileValue(9));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(TileId(4)), Some(TileValue(9)));
        assert_eq!(ledger.entries()[0].0, TileId(4));
    }

    #[test]
    fn test_clear() {
        let mut ledger = MemoryLedger::new();
        ledger.record(TileId(0), TileValue(2));
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.get(TileId(0)), None);
    }
}

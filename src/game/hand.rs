//! A player's rack of tiles and their turn history
//!
//! The history is an append-only log of turn outcomes used solely to detect
//! two consecutive passes. Taking a tile out logs an event even if the caller
//! later rejects the placement and gives the tile back; the game-end rules
//! depend on this exact behavior.

use super::Tile;

/// One entry in a hand's turn history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Place,
    Replace,
    Pass,
}

/// An ordered multiset of owned tiles plus the turn-event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    tiles: Vec<Tile>,
    history: Vec<TurnEvent>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            history: Vec::new(),
        }
    }

    /// Remove and return the first tile matching `letter`, recording a
    /// `Place` event. Tiles of one letter are interchangeable since the
    /// value is letter-determined.
    pub fn take_to_place(&mut self, letter: char) -> Option<Tile> {
        self.take(letter, TurnEvent::Place)
    }

    /// Remove and return the first tile matching `letter`, recording a
    /// `Replace` event.
    pub fn take_to_replace(&mut self, letter: char) -> Option<Tile> {
        self.take(letter, TurnEvent::Replace)
    }

    fn take(&mut self, letter: char, event: TurnEvent) -> Option<Tile> {
        let idx = self.tiles.iter().position(|t| t.letter == letter)?;
        self.history.push(event);
        Some(self.tiles.remove(idx))
    }

    /// Add a tile back. No history effect.
    pub fn give(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Add several tiles. No history effect.
    pub fn give_all(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Record a passed turn without touching the rack.
    pub fn record_pass(&mut self) {
        self.history.push(TurnEvent::Pass);
    }

    /// True iff the history contains an adjacent pass-pass pair anywhere,
    /// not just at the tail. A pair buried earlier in the log still ends
    /// the game.
    pub fn passed_twice_in_a_row(&self) -> bool {
        self.history
            .windows(2)
            .any(|w| w == [TurnEvent::Pass, TurnEvent::Pass])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_of(letters: &str) -> Hand {
        Hand::with_tiles(letters.chars().map(|l| Tile::new(l, 1)).collect())
    }

    #[test]
    fn take_removes_the_first_match() {
        let mut hand = Hand::with_tiles(vec![
            Tile::new('B', 3),
            Tile::new('A', 1),
            Tile::new('A', 1),
        ]);

        assert_eq!(hand.take_to_place('A'), Some(Tile::new('A', 1)));
        assert_eq!(hand.size(), 2);
        assert_eq!(hand.take_to_place('C'), None);
        assert_eq!(hand.size(), 2);
    }

    #[test]
    fn take_logs_even_when_the_tile_comes_back() {
        // A placement rejected for adjacency returns the tile but keeps the
        // Place entry, which breaks up a pass-pass pair.
        let mut hand = hand_of("A");
        hand.record_pass();
        let tile = hand.take_to_place('A').unwrap();
        hand.give(tile);
        hand.record_pass();

        assert!(!hand.passed_twice_in_a_row());
    }

    #[test]
    fn missed_take_logs_nothing() {
        let mut hand = hand_of("A");
        hand.record_pass();
        assert_eq!(hand.take_to_place('Z'), None);
        hand.record_pass();

        assert!(hand.passed_twice_in_a_row());
    }

    #[test]
    fn give_does_not_touch_history() {
        let mut hand = hand_of("");
        hand.record_pass();
        hand.give(Tile::new('A', 1));
        hand.give_all(vec![Tile::new('B', 3), Tile::new('C', 3)]);
        hand.record_pass();

        assert_eq!(hand.size(), 3);
        assert!(hand.passed_twice_in_a_row());
    }

    #[test]
    fn pass_pair_anywhere_in_history_counts() {
        let mut hand = hand_of("AB");
        hand.record_pass();
        hand.record_pass();
        hand.take_to_place('A');
        hand.take_to_replace('B');

        assert!(hand.passed_twice_in_a_row());
    }

    #[test]
    fn interleaved_passes_do_not_count() {
        let mut hand = hand_of("AB");
        hand.record_pass();
        hand.take_to_place('A');
        hand.record_pass();
        hand.take_to_replace('B');
        hand.record_pass();

        assert!(!hand.passed_twice_in_a_row());
    }
}

#![allow(dead_code)]
//! Game pieces: tiles, the letter point-value table, gameplay constants

pub mod bag;
pub mod dictionary;
pub mod hand;
pub mod player;

use std::collections::BTreeMap;

/// Number of tiles a player holds in normal play.
pub const HAND_CAPACITY: usize = 7;

/// Flat bonus for placing an entire hand of tiles in one turn.
pub const BINGO_BONUS: i32 = 50;

/// Side length of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Allowed player counts for a local game.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// A single letter tile.
///
/// A vacant board cell is represented by [`Tile::EMPTY`] rather than an
/// `Option`, so a freshly initialized grid is a grid of real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub letter: char,
    pub value: i32,
}

impl Tile {
    /// Sentinel marking an unoccupied board cell.
    pub const EMPTY: Tile = Tile {
        letter: ' ',
        value: -1,
    };

    pub fn new(letter: char, value: i32) -> Self {
        Self { letter, value }
    }

    /// True for the vacant-cell sentinel.
    pub fn is_vacant(&self) -> bool {
        self.letter == ' '
    }
}

/// The letter -> point-value table, loaded once per game from the tile
/// distribution or a saved game. Iteration order is sorted by letter, which
/// the save format relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterValues {
    values: BTreeMap<char, i32>,
}

impl LetterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, letter: char, value: i32) {
        self.values.insert(letter, value);
    }

    pub fn get(&self, letter: char) -> Option<i32> {
        self.values.get(&letter).copied()
    }

    /// Point value for a letter. Every letter that reaches the bag or the
    /// board has an entry; a miss is an invariant violation.
    pub fn value_of(&self, letter: char) -> i32 {
        self.get(letter)
            .unwrap_or_else(|| panic!("letter {letter} missing from the value table"))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in sorted letter order.
    pub fn iter(&self) -> impl Iterator<Item = (char, i32)> + '_ {
        self.values.iter().map(|(l, v)| (*l, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tile_is_a_sentinel_value() {
        assert!(Tile::EMPTY.is_vacant());
        assert_eq!(Tile::EMPTY.letter, ' ');
        assert_eq!(Tile::EMPTY.value, -1);
        assert!(!Tile::new('A', 1).is_vacant());
    }

    #[test]
    fn tile_equality_is_structural() {
        assert_eq!(Tile::new('A', 1), Tile::new('A', 1));
        assert_ne!(Tile::new('A', 1), Tile::new('A', 2));
        assert_ne!(Tile::new('A', 1), Tile::new('B', 1));
    }

    #[test]
    fn letter_values_iterate_sorted() {
        let mut values = LetterValues::new();
        values.insert('Z', 10);
        values.insert('A', 1);
        values.insert('M', 3);

        let order: Vec<char> = values.iter().map(|(l, _)| l).collect();
        assert_eq!(order, vec!['A', 'M', 'Z']);
        assert_eq!(values.value_of('Z'), 10);
    }

    #[test]
    #[should_panic(expected = "missing from the value table")]
    fn unknown_letter_is_an_invariant_violation() {
        LetterValues::new().value_of('A');
    }
}

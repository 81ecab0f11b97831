//! The tile bag: the shared pool of undrawn tiles
//!
//! The bag is created once per game from a distribution description
//! (`LETTER VALUE QUANTITY` per line) and owns every tile not yet drawn.
//! Draws come off the front, exchanged tiles go on the back, and a single
//! shuffle before a fresh game randomizes the order.

use super::{LetterValues, Tile};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

/// Embedded standard distribution (98 tiles), used when no `--tiles` file
/// is given.
static DEFAULT_DISTRIBUTION: &str = include_str!("../../data/tiles.txt");

static STANDARD: Lazy<(TileBag, LetterValues)> = Lazy::new(|| {
    parse_distribution(DEFAULT_DISTRIBUTION).expect("embedded tile distribution is well-formed")
});

/// Distribution lines shorter than this are silently skipped.
const MIN_LINE_LEN: usize = 5;

/// A malformed tile-distribution description.
#[derive(Debug)]
pub struct DistributionError {
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for DistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid tile distribution at line {}: {}",
            self.line, self.reason
        )
    }
}

impl std::error::Error for DistributionError {}

/// Parse a distribution description into a bag and the letter-value table.
pub fn parse_distribution(text: &str) -> Result<(TileBag, LetterValues), DistributionError> {
    let mut bag = TileBag::new();
    let mut values = LetterValues::new();

    for (idx, line) in text.lines().enumerate() {
        if line.len() < MIN_LINE_LEN {
            continue;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != 3 {
            return Err(DistributionError {
                line: idx + 1,
                reason: format!("expected `LETTER VALUE QUANTITY`, got {:?}", line),
            });
        }

        let letter = match fields[0].chars().next() {
            Some(l) if fields[0].len() == 1 && l.is_ascii_uppercase() => l,
            _ => {
                return Err(DistributionError {
                    line: idx + 1,
                    reason: format!("{:?} is not a letter A-Z", fields[0]),
                })
            }
        };
        let value: i32 = fields[1].parse().map_err(|_| DistributionError {
            line: idx + 1,
            reason: format!("{:?} is not a point value", fields[1]),
        })?;
        let quantity: usize = fields[2].parse().map_err(|_| DistributionError {
            line: idx + 1,
            reason: format!("{:?} is not a quantity", fields[2]),
        })?;

        values.insert(letter, value);
        for _ in 0..quantity {
            bag.add(Tile::new(letter, value));
        }
    }

    Ok((bag, values))
}

/// The standard English distribution, parsed from the embedded table.
pub fn standard() -> (TileBag, LetterValues) {
    STANDARD.clone()
}

/// The pool of undrawn tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Uniformly permute the bag. Called once before play on a fresh game;
    /// loaded games keep their saved order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Remove and return up to `n` tiles, fewer if the bag runs dry.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let n = n.min(self.tiles.len());
        self.tiles.drain(..n).collect()
    }

    /// Return `tile` to the back of the bag, then draw one from the front.
    /// The inserted tile guarantees the draw succeeds.
    pub fn exchange(&mut self, tile: Tile) -> Tile {
        self.tiles.push(tile);
        self.tiles.remove(0)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

//! Word discovery: which words on the board are new this turn
//!
//! Scans every column top-to-bottom and every row left-to-right for maximal
//! runs of occupied cells (length >= 2; a lone tile is not a word). A run is
//! new iff its string is absent from the board's accumulated word list.
//! Newness is string-based, so a word repeated verbatim elsewhere on the
//! board is never detected as new again; this under-counting is a documented
//! limitation of the accumulated list, preserved deliberately.

use super::Board;
use crate::game::Tile;

/// The outcome of a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Newly formed runs, as tile sequences for scoring. Column runs come
    /// before row runs.
    pub new_words: Vec<Vec<Tile>>,
    /// Every word currently visible on the board, new or not, used to
    /// refresh the accumulated list once the turn commits.
    pub all_words: Vec<String>,
}

impl Board {
    /// Find every maximal run on the board and split it into new words
    /// (against the accumulated list) and the full currently-visible list.
    pub fn discover_words(&self) -> Discovery {
        let mut runs: Vec<Vec<Tile>> = Vec::new();

        for col in 0..self.size() {
            let mut run = Vec::new();
            for row in 0..self.size() {
                let tile = self.tile(super::Position::new(row, col));
                if tile.is_vacant() {
                    flush_run(&mut run, &mut runs);
                } else {
                    run.push(tile);
                }
            }
            flush_run(&mut run, &mut runs);
        }

        for row in 0..self.size() {
            let mut run = Vec::new();
            for col in 0..self.size() {
                let tile = self.tile(super::Position::new(row, col));
                if tile.is_vacant() {
                    flush_run(&mut run, &mut runs);
                } else {
                    run.push(tile);
                }
            }
            flush_run(&mut run, &mut runs);
        }

        let mut discovery = Discovery {
            new_words: Vec::new(),
            all_words: Vec::new(),
        };

        for run in runs {
            let word: String = run.iter().map(|t| t.letter).collect();
            let known = self.words_placed().iter().any(|w| *w == word);
            discovery.all_words.push(word);
            if !known {
                discovery.new_words.push(run);
            }
        }

        discovery
    }
}

/// A run shorter than two tiles is not a word.
fn flush_run(run: &mut Vec<Tile>, runs: &mut Vec<Vec<Tile>>) {
    if run.len() >= 2 {
        runs.push(std::mem::take(run));
    } else {
        run.clear();
    }
}

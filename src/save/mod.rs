//! Saved-game serialization
//!
//! The save file is a line-oriented text format written in a fixed order:
//! player count; each player (name, score, hand listing); the letter-value
//! table; the board as its display grid; the bag listing; the turn rotation
//! starting with the player up next; then every word ever confirmed on the
//! board, one per line. The shape is a committed contract -- any change is a
//! breaking format change.
//!
//! Each persisted entity implements [`Serialize`] independently; the whole
//! file is assembled from those pieces and parsed back field by field.

use crate::board::Board;
use crate::engine::Game;
use crate::game::bag::TileBag;
use crate::game::hand::Hand;
use crate::game::player::Player;
use crate::game::{LetterValues, Tile};
use chrono::Local;
use directories::ProjectDirs;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Capability contract: an entity that knows its own save-file text form.
pub trait Serialize {
    fn serialize(&self) -> String;
}

/// Errors raised while reading or writing saved games.
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    /// The requested save file does not exist. Recoverable: the caller may
    /// retry with a different path.
    NotFound(String),
    /// The file exists but does not follow the save format.
    Corrupt { line: usize, reason: String },
    /// A turn-order entry names nobody in the player list.
    UnknownPlayer(String),
    /// No OS data directory for the auto-save.
    NoDataDirectory,
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "i/o error: {}", e),
            SaveError::NotFound(path) => write!(f, "\"{}\" is not a valid file path!", path),
            SaveError::Corrupt { line, reason } => {
                write!(f, "saved game is corrupt at line {}: {}", line, reason)
            }
            SaveError::UnknownPlayer(name) => {
                write!(f, "saved turn order names unknown player \"{}\"", name)
            }
            SaveError::NoDataDirectory => write!(f, "could not determine a data directory"),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl Serialize for Tile {
    fn serialize(&self) -> String {
        format!("{}-{}", self.letter, self.value)
    }
}

fn tile_listing(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(Serialize::serialize)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Serialize for Hand {
    fn serialize(&self) -> String {
        tile_listing(self.tiles())
    }
}

impl Serialize for TileBag {
    fn serialize(&self) -> String {
        tile_listing(self.tiles())
    }
}

impl Serialize for Player {
    fn serialize(&self) -> String {
        format!("{}\n{}\n{}", self.name(), self.score(), self.hand().serialize())
    }
}

impl Serialize for Board {
    fn serialize(&self) -> String {
        self.grid_text(self.full_viewport())
    }
}

impl Serialize for Game {
    fn serialize(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{}", self.players().len());
        for player in self.players() {
            let _ = writeln!(text, "{}", player.serialize());
        }
        for (letter, value) in self.values().iter() {
            let _ = writeln!(text, "{} {}", letter, value);
        }
        text.push_str(&self.board().serialize());
        let _ = writeln!(text, "{}", self.bag().serialize());
        for name in self.rotation_names() {
            let _ = writeln!(text, "{}", name);
        }
        for word in self.board().words_placed() {
            let _ = writeln!(text, "{}", word);
        }
        text
    }
}

/// Everything a save file holds, parsed but not yet wired into a [`Game`].
#[derive(Debug, Clone)]
pub struct SaveData {
    pub players: Vec<Player>,
    pub values: LetterValues,
    pub board_grid: Vec<Vec<Tile>>,
    pub bag: TileBag,
    /// Player names in rotation order; the first is up next.
    pub turn_order: Vec<String>,
    pub words: Vec<String>,
}

/// Numbered line reader so corruption reports point at the offending line.
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    current: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: 0,
        }
    }

    fn next(&mut self, expected: &str) -> Result<&'a str, SaveError> {
        self.current += 1;
        self.lines.next().ok_or(SaveError::Corrupt {
            line: self.current,
            reason: format!("missing {}", expected),
        })
    }

    fn corrupt(&self, reason: String) -> SaveError {
        SaveError::Corrupt {
            line: self.current,
            reason,
        }
    }

    fn rest(self) -> Vec<String> {
        self.lines.map(str::to_string).collect()
    }
}

/// Parse a full save file.
pub fn parse(text: &str, board_size: usize) -> Result<SaveData, SaveError> {
    let mut reader = LineReader::new(text);

    let player_count: usize = {
        let line = reader.next("player count")?;
        line.parse()
            .map_err(|_| reader.corrupt(format!("{:?} is not a player count", line)))?
    };

    let mut players = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        players.push(parse_player(&mut reader)?);
    }

    let values = parse_letter_values(&mut reader)?;
    let board_grid = parse_board(&mut reader, &values, board_size)?;

    let bag_line = reader.next("tile bag")?;
    let bag = TileBag::from_tiles(parse_tile_listing(bag_line).map_err(|r| reader.corrupt(r))?);

    let mut turn_order = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        let name = reader.next("turn-order name")?;
        if !players.iter().any(|p| p.name() == name) {
            return Err(SaveError::UnknownPlayer(name.to_string()));
        }
        turn_order.push(name.to_string());
    }

    Ok(SaveData {
        players,
        values,
        board_grid,
        bag,
        turn_order,
        words: reader.rest(),
    })
}

fn parse_player(reader: &mut LineReader<'_>) -> Result<Player, SaveError> {
    let name = reader.next("player name")?.to_string();
    let score_line = reader.next("player score")?;
    let score: i32 = score_line
        .parse()
        .map_err(|_| reader.corrupt(format!("{:?} is not a score", score_line)))?;
    let hand_line = reader.next("player hand")?;
    let tiles = parse_tile_listing(hand_line).map_err(|r| reader.corrupt(r))?;

    Ok(Player::from_save(name, score, Hand::with_tiles(tiles)))
}

/// The letter table is one `LETTER value` line per letter; the section ends
/// where the board header (which starts with spaces) begins.
fn parse_letter_values(reader: &mut LineReader<'_>) -> Result<LetterValues, SaveError> {
    let mut values = LetterValues::new();

    loop {
        let line = match reader.lines.clone().next() {
            Some(line) if is_letter_value_line(line) => {
                reader.next("letter value")?;
                line
            }
            _ => break,
        };
        let (letter, value) = line.split_once(' ').expect("shape checked above");
        let value: i32 = value
            .parse()
            .map_err(|_| reader.corrupt(format!("{:?} is not a point value", line)))?;
        values.insert(letter.chars().next().expect("shape checked above"), value);
    }

    Ok(values)
}

fn is_letter_value_line(line: &str) -> bool {
    match line.split_once(' ') {
        Some((letter, value)) => {
            letter.len() == 1
                && letter.chars().all(|c| c.is_ascii_uppercase())
                && !value.is_empty()
                && value.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// The board section is the display grid: two header lines, then one
/// pipe-delimited line per row.
fn parse_board(
    reader: &mut LineReader<'_>,
    values: &LetterValues,
    board_size: usize,
) -> Result<Vec<Vec<Tile>>, SaveError> {
    reader.next("board column header")?;
    reader.next("board underline")?;

    let mut grid = Vec::with_capacity(board_size);
    for _ in 0..board_size {
        let line = reader.next("board row")?;
        let cells: Vec<&str> = line.split('|').collect();
        if cells.len() != board_size + 2 {
            return Err(reader.corrupt(format!(
                "expected {} board columns, got {}",
                board_size,
                cells.len().saturating_sub(2)
            )));
        }

        let mut row = Vec::with_capacity(board_size);
        // cells[0] is the row label, the final segment is the empty remainder
        // after the closing pipe.
        for cell in &cells[1..=board_size] {
            let letter = cell
                .chars()
                .nth(1)
                .ok_or_else(|| reader.corrupt(format!("board cell {:?} is too narrow", cell)))?;
            if letter == ' ' {
                row.push(Tile::EMPTY);
            } else {
                let value = values
                    .get(letter)
                    .ok_or_else(|| reader.corrupt(format!("letter {} has no value", letter)))?;
                row.push(Tile::new(letter, value));
            }
        }
        grid.push(row);
    }

    Ok(grid)
}

/// Parse a `A-1, B-3, ...` tile listing. An empty line is an empty listing.
fn parse_tile_listing(line: &str) -> Result<Vec<Tile>, String> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    line.split(", ")
        .map(|entry| {
            let (letter, value) = entry
                .split_once('-')
                .ok_or_else(|| format!("{:?} is not a letter-value pair", entry))?;
            let letter = match letter.chars().next() {
                Some(l) if letter.len() == 1 => l,
                _ => return Err(format!("{:?} is not a letter", letter)),
            };
            let value: i32 = value
                .parse()
                .map_err(|_| format!("{:?} is not a point value", value))?;
            Ok(Tile::new(letter, value))
        })
        .collect()
}

/// Read a save file, reporting a missing path as a recoverable error.
pub fn read_file(path: &str) -> Result<String, SaveError> {
    if !Path::new(path).exists() {
        return Err(SaveError::NotFound(path.to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write the game to the given path.
pub fn write_game(game: &Game, path: &Path) -> Result<(), SaveError> {
    fs::write(path, game.serialize())?;
    Ok(())
}

/// Write a date-stamped auto-save into the OS data directory and return its
/// path. Used when the input source ends mid-game.
pub fn auto_save(game: &Game) -> Result<PathBuf, SaveError> {
    let dirs = ProjectDirs::from("", "", "scrabbler").ok_or(SaveError::NoDataDirectory)?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;

    let stamp = Local::now().format("%d_%m_%Y");
    let path = dir.join(format!("savedgame_{}.txt", stamp));
    write_game(game, &path)?;
    Ok(path)
}

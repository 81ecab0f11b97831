//! The main menu and game setup
//!
//! Everything here is thin glue around the engine: choosing new/load,
//! collecting player names, wiring up the tile distribution and the
//! optional dictionary, and performing the auto-save when the input source
//! ends mid-game. End-of-input at any prompt is a polite exit, not an
//! error.

use crate::board::Board;
use crate::engine::{Game, SessionEnd};
use crate::game::bag;
use crate::game::dictionary::Dictionary;
use crate::game::{DEFAULT_BOARD_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::input::{self, Signal};
use crate::save::{self, SaveError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Feature selection from the command line.
pub struct Options {
    pub word_validation: bool,
    pub board_expansion: bool,
    /// Tile distribution file; the embedded standard set when absent.
    pub tiles: Option<PathBuf>,
    /// Dictionary path, only read when word validation is on.
    pub dictionary: PathBuf,
}

/// Run the menu until the player starts (and finishes) a game or quits.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    options: &Options,
) -> io::Result<()> {
    writeln!(out, "Menu")?;
    writeln!(out, "----")?;
    writeln!(out, "1. New game")?;
    writeln!(out, "2. Load game")?;
    writeln!(out, "3. Credits")?;
    writeln!(out, "4. Quit")?;

    loop {
        let line = match input::prompt(input, out)? {
            Signal::Line(line) => line,
            Signal::Eof => return goodbye(out),
        };

        match line.trim().parse::<u32>() {
            Ok(1) => {
                new_game(input, out, options)?;
                return goodbye(out);
            }
            Ok(2) => {
                load_game(input, out, options)?;
                return goodbye(out);
            }
            Ok(3) => credits(out)?,
            Ok(4) => return goodbye(out),
            Ok(_) => writeln!(out, "Your choice must be between 1-4 (bounds included).")?,
            Err(_) => writeln!(out, "Invalid option. Please choose either 1, 2, 3, or 4.")?,
        }
    }
}

fn goodbye<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Goodbye :)")
}

fn credits<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "----------------------------------")?;
    writeln!(out, "scrabbler")?;
    writeln!(out, "Terminal Scrabble for 2-4 players")?;
    writeln!(out, "sharing one keyboard.")?;
    writeln!(out, "----------------------------------")
}

fn new_game<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    options: &Options,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Starting a new game")?;

    let (mut tile_bag, values) = match &options.tiles {
        None => bag::standard(),
        Some(path) => {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    writeln!(
                        out,
                        "Could not read the tile file \"{}\": {}",
                        path.display(),
                        err
                    )?;
                    return Ok(());
                }
            };
            match bag::parse_distribution(&text) {
                Ok(parsed) => parsed,
                Err(err) => {
                    writeln!(out, "Could not read \"{}\": {}", path.display(), err)?;
                    return Ok(());
                }
            }
        }
    };

    let dictionary = match load_dictionary(out, options)? {
        DictionarySetup::Off => None,
        DictionarySetup::Loaded(dictionary) => Some(dictionary),
        DictionarySetup::Failed => return Ok(()),
    };

    writeln!(
        out,
        "Please enter the number of players ({}-{}):",
        MIN_PLAYERS, MAX_PLAYERS
    )?;
    let Some(count) = read_player_count(input, out)? else {
        return Ok(());
    };

    let mut names: Vec<String> = Vec::with_capacity(count);
    for number in 1..=count {
        match read_player_name(input, out, number, &names)? {
            Some(name) => names.push(name),
            None => return Ok(()),
        }
    }

    tile_bag.shuffle(&mut rand::rng());
    let board = Board::new(DEFAULT_BOARD_SIZE, options.board_expansion);
    let mut game = Game::new(names, tile_bag, values, board, dictionary);

    writeln!(out, "Let's play!")?;
    let end = game.run(input, out)?;
    finish(out, end, &game)
}

fn load_game<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    options: &Options,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Enter the filename of the game to load:")?;

    let data = loop {
        let path = match input::prompt(input, out)? {
            Signal::Line(line) => line,
            Signal::Eof => return Ok(()),
        };

        match save::read_file(&path) {
            Ok(text) => match save::parse(&text, DEFAULT_BOARD_SIZE) {
                Ok(data) => break data,
                Err(err) => {
                    // A present-but-broken file is an integrity failure, not
                    // a wrong path; re-prompting will not fix it.
                    writeln!(out, "Could not load the saved game: {}", err)?;
                    return Ok(());
                }
            },
            Err(err @ SaveError::NotFound(_)) => {
                writeln!(out, "{}", err)?;
                writeln!(out)?;
            }
            Err(err) => {
                writeln!(out, "Could not load the saved game: {}", err)?;
                return Ok(());
            }
        }
    };

    let dictionary = match load_dictionary(out, options)? {
        DictionarySetup::Off => None,
        DictionarySetup::Loaded(dictionary) => Some(dictionary),
        DictionarySetup::Failed => return Ok(()),
    };

    let mut game = match Game::from_save(data, options.board_expansion, dictionary) {
        Ok(game) => game,
        Err(err) => {
            writeln!(out, "Could not load the saved game: {}", err)?;
            return Ok(());
        }
    };

    writeln!(out)?;
    writeln!(out, "Scrabble game successfully loaded!")?;
    writeln!(out, "Let's play!")?;
    let end = game.run(input, out)?;
    finish(out, end, &game)
}

enum DictionarySetup {
    /// Word validation is off.
    Off,
    Loaded(Dictionary),
    /// Required but unreadable; the failure has been reported.
    Failed,
}

fn load_dictionary<W: Write>(out: &mut W, options: &Options) -> io::Result<DictionarySetup> {
    if !options.word_validation {
        return Ok(DictionarySetup::Off);
    }

    match Dictionary::load(&options.dictionary) {
        Ok(dictionary) => Ok(DictionarySetup::Loaded(dictionary)),
        Err(err) => {
            writeln!(
                out,
                "Could not read the dictionary \"{}\": {}",
                options.dictionary.display(),
                err
            )?;
            Ok(DictionarySetup::Failed)
        }
    }
}

fn finish<W: Write>(out: &mut W, end: SessionEnd, game: &Game) -> io::Result<()> {
    if end == SessionEnd::Aborted {
        match save::auto_save(game) {
            Ok(path) => writeln!(out, "Game auto-saved to {}", path.display())?,
            Err(err) => writeln!(out, "Could not auto-save the game: {}", err)?,
        }
    }
    Ok(())
}

fn read_player_count<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<usize>> {
    loop {
        let line = match input::prompt(input, out)? {
            Signal::Line(line) => line,
            Signal::Eof => return Ok(None),
        };

        match line.trim().parse::<usize>() {
            Ok(count) if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) => {
                writeln!(out)?;
                return Ok(Some(count));
            }
            Ok(_) => writeln!(
                out,
                "You must enter a number between {} and {} (inclusive)!",
                MIN_PLAYERS, MAX_PLAYERS
            )?,
            Err(_) => writeln!(out, "You must enter a number!")?,
        }
    }
}

fn read_player_name<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    number: usize,
    taken: &[String],
) -> io::Result<Option<String>> {
    writeln!(
        out,
        "Enter a name for player {} (uppercase characters only):",
        number
    )?;

    loop {
        let name = match input::prompt(input, out)? {
            Signal::Line(line) => line,
            Signal::Eof => return Ok(None),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_uppercase()) {
            writeln!(
                out,
                "Invalid player name. You must enter a name that is entirely capitalised."
            )?;
        } else if taken.iter().any(|t| *t == name) {
            writeln!(out, "That name is already taken. Please choose another.")?;
        } else {
            writeln!(out)?;
            return Ok(Some(name));
        }
    }
}

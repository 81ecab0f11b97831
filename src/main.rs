//! scrabbler - terminal Scrabble for 2-4 players sharing one keyboard
//!
//! Place tiles, form words, keep the bag honest.

mod app;
mod board;
mod engine;
mod game;
mod input;
mod save;
mod ui;

use clap::Parser;
use std::io;
use std::path::PathBuf;

/// Terminal Scrabble for 2-4 players sharing one keyboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Check newly formed words against the dictionary before scoring
    #[arg(long)]
    word_validation: bool,

    /// Show only the occupied part of the board plus a one-cell border
    #[arg(long)]
    board_expansion: bool,

    /// Tile distribution file (LETTER VALUE QUANTITY per line); the
    /// standard distribution is built in
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Dictionary word list: sorted ascending, lower-case, one word per line
    #[arg(long, default_value = "official_words_list.txt")]
    dictionary: PathBuf,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    ui::banner(&mut out, args.word_validation, args.board_expansion)?;

    let options = app::Options {
        word_validation: args.word_validation,
        board_expansion: args.board_expansion,
        tiles: args.tiles,
        dictionary: args.dictionary,
    };
    app::run(&mut input, &mut out, &options)
}

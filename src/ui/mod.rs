//! Line-oriented rendering: the banner, round header, board, hands, scores
//!
//! Everything is written to a caller-supplied writer so the turn engine can
//! be driven by tests. Styling is a sprinkle of `crossterm` over otherwise
//! plain text; the board grid itself stays unstyled because its text shape
//! doubles as the save format.

use crate::board::Board;
use crate::engine::Game;
use crate::game::hand::Hand;
use crate::game::player::Player;
use crate::save::Serialize as _;
use crossterm::style::Stylize;
use std::io::{self, Write};

/// The greeting and enhancement summary shown once at startup.
pub fn banner<W: Write>(out: &mut W, word_validation: bool, board_expansion: bool) -> io::Result<()> {
    writeln!(out, "          {}", "Welcome to Scrabble!".bold())?;
    writeln!(out, "--------------------------------------")?;
    render_enhancement(out, "Word Validation", word_validation)?;
    render_enhancement(out, "Board Expansion", board_expansion)?;
    writeln!(out, "--------------------------------------")?;
    writeln!(out)
}

fn render_enhancement<W: Write>(out: &mut W, name: &str, enabled: bool) -> io::Result<()> {
    let state = if enabled { "enabled" } else { "disabled" };
    writeln!(out, "[{}] > {} {}!", "ENHANCEMENT".cyan(), name, state)
}

/// Everything a player needs to see before their turn: whose turn it is,
/// all scores, the board, and their own hand.
pub fn render_round<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}, it's your turn",
        game.current_player().name().bold()
    )?;
    render_scores(out, game.players())?;
    render_board(out, game.board())?;
    writeln!(out)?;
    render_hand(out, game.current_player().hand())?;
    writeln!(out)
}

pub fn render_scores<W: Write>(out: &mut W, players: &[Player]) -> io::Result<()> {
    for player in players {
        writeln!(out, "Score for {}: {}", player.name(), player.score())?;
    }
    Ok(())
}

/// The grid, windowed to the occupied bounding box plus one cell when the
/// expansion feature is on.
pub fn render_board<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    let viewport = if board.windowed() {
        board.viewport(1)
    } else {
        board.full_viewport()
    };
    write!(out, "{}", board.grid_text(viewport))
}

pub fn render_hand<W: Write>(out: &mut W, hand: &Hand) -> io::Result<()> {
    writeln!(out, "Your hand is:")?;
    writeln!(out, "{}", hand.serialize())
}

/// The full-hand bonus callout.
pub fn render_bingo<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "BINGO!!!".bold().yellow())
}

/// Final scores plus the winner, or the all-tied message.
pub fn render_game_over<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    writeln!(out, "Game over")?;
    render_scores(out, game.players())?;

    let players = game.players();
    let all_tied = players.iter().all(|p| p.score() == players[0].score());
    if all_tied {
        writeln!(out, "Two or more players tied. Congratulations!")
    } else {
        let mut winner = &players[0];
        for player in players {
            if player.score() > winner.score() {
                winner = player;
            }
        }
        writeln!(out, "Player {} won!", winner.name().bold())
    }
}

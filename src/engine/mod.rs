//! The turn engine
//!
//! One [`Game`] owns the players, board, bag and letter table for a whole
//! session. Each turn is a loop over sub-commands: placements accumulate on
//! the board as a staged list, `place done` validates and scores them as a
//! unit, and a failed validation rolls every staged placement back so the
//! board and hand are exactly as they were before the turn's first
//! placement. Only this module mutates the board, hands and scores.

pub mod command;

use crate::board::{Board, Position};
use crate::game::bag::TileBag;
use crate::game::dictionary::Dictionary;
use crate::game::player::Player;
use crate::game::{LetterValues, Tile, BINGO_BONUS, HAND_CAPACITY};
use crate::input::{self, Signal};
use crate::save::{self, SaveData, SaveError};
use crate::ui;
use self::command::Command;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// How a session of play finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A game-over condition was reached and the summary was shown.
    GameOver,
    /// The player entered `quit`. No auto-save.
    Quit,
    /// The input source ended mid-game. The in-progress turn has been
    /// rolled back; the caller should auto-save.
    Aborted,
}

/// How a single turn finished.
enum TurnOutcome {
    Completed,
    Quit,
    SessionEnded,
}

/// A full game in progress.
pub struct Game {
    players: Vec<Player>,
    board: Board,
    bag: TileBag,
    values: LetterValues,
    dictionary: Option<Dictionary>,
    /// Index of the player whose turn it is; rotation is `(current + 1) % n`.
    current: usize,
}

impl Game {
    /// Start a fresh game: each player draws a full hand from the (already
    /// shuffled) bag, in the given order.
    pub fn new(
        names: Vec<String>,
        mut bag: TileBag,
        values: LetterValues,
        board: Board,
        dictionary: Option<Dictionary>,
    ) -> Self {
        let players = names
            .into_iter()
            .map(|name| {
                let mut player = Player::new(name);
                player.hand_mut().give_all(bag.draw(HAND_CAPACITY));
                player
            })
            .collect();

        Self {
            players,
            board,
            bag,
            values,
            dictionary,
            current: 0,
        }
    }

    /// Resume a saved game. The saved bag order is preserved; no re-shuffle.
    pub fn from_save(
        data: SaveData,
        windowed: bool,
        dictionary: Option<Dictionary>,
    ) -> Result<Self, SaveError> {
        let mut board = Board::from_grid(data.board_grid, windowed);
        board.set_words_placed(data.words);

        let next = data
            .turn_order
            .first()
            .cloned()
            .ok_or_else(|| SaveError::UnknownPlayer(String::new()))?;
        let current = data
            .players
            .iter()
            .position(|p| p.name() == next)
            .ok_or(SaveError::UnknownPlayer(next))?;

        Ok(Self {
            players: data.players,
            board,
            bag: data.bag,
            values: data.values,
            dictionary,
            current,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    pub fn values(&self) -> &LetterValues {
        &self.values
    }

    /// Player names in turn order, starting with the player up next. This is
    /// the order the save format stores.
    pub fn rotation_names(&self) -> Vec<&str> {
        (0..self.players.len())
            .map(|i| self.players[(self.current + i) % self.players.len()].name())
            .collect()
    }

    /// Drive the game loop until it ends. Each iteration shows the round
    /// banner, runs one full turn, checks the end conditions, and refills
    /// the acting player's hand.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<SessionEnd> {
        loop {
            ui::render_round(out, self)?;

            match self.take_turn(input, out)? {
                TurnOutcome::Completed => {}
                TurnOutcome::Quit => return Ok(SessionEnd::Quit),
                TurnOutcome::SessionEnded => return Ok(SessionEnd::Aborted),
            }

            let in_progress = !self.is_over();
            self.refill(in_progress);
            if !in_progress {
                ui::render_game_over(out, self)?;
                return Ok(SessionEnd::GameOver);
            }

            self.current = (self.current + 1) % self.players.len();
        }
    }

    /// One complete turn: loop over sub-commands until a placement set is
    /// committed, a tile is replaced, or the turn is passed. `save` and
    /// invalid input loop back without ending the turn.
    fn take_turn<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<TurnOutcome> {
        let mut staged: Vec<(Tile, Position)> = Vec::new();
        let mut bingo = false;

        loop {
            let line = match input::prompt(input, out)? {
                Signal::Line(line) => line,
                Signal::Eof => {
                    // The auto-save must reflect the last committed turn.
                    self.rollback(&mut staged);
                    return Ok(TurnOutcome::SessionEnded);
                }
            };

            let cmd = match command::parse(&line, self.board.size()) {
                Ok(cmd) => cmd,
                Err(err) => {
                    writeln!(out, "{}", err.message(self.board.size()))?;
                    continue;
                }
            };

            match cmd {
                Command::Place { letter, position } => {
                    self.stage_placement(letter, position, &mut staged, &mut bingo, out)?;
                }
                Command::PlaceDone => {
                    if staged.is_empty() {
                        writeln!(
                            out,
                            "Nice try! You cannot do this unless you have previously placed \
                             something. If you wish to skip your turn, please use the \"pass\" \
                             command."
                        )?;
                    } else if self.close_turn(&mut staged, &mut bingo, out)? {
                        return Ok(TurnOutcome::Completed);
                    }
                }
                Command::Replace { letter } => {
                    if !staged.is_empty() {
                        self.report_staged_restriction(out)?;
                    } else if self.replace_tile(letter, out)? {
                        return Ok(TurnOutcome::Completed);
                    }
                }
                Command::Pass => {
                    if !staged.is_empty() {
                        self.report_staged_restriction(out)?;
                    } else {
                        self.players[self.current].hand_mut().record_pass();
                        return Ok(TurnOutcome::Completed);
                    }
                }
                Command::Save { filename } => match save::write_game(self, Path::new(&filename)) {
                    Ok(()) => writeln!(out, "Game saved to {}", filename)?,
                    Err(err) => writeln!(out, "Could not save the game: {}", err)?,
                },
                Command::Quit => {
                    writeln!(out)?;
                    return Ok(TurnOutcome::Quit);
                }
            }
        }
    }

    /// Stage one placement: withdraw the tile, check the cell, write the
    /// board. A rejected cell hands the tile straight back.
    fn stage_placement<W: Write>(
        &mut self,
        letter: char,
        position: Position,
        staged: &mut Vec<(Tile, Position)>,
        bingo: &mut bool,
        out: &mut W,
    ) -> io::Result<()> {
        let player = &mut self.players[self.current];
        let Some(tile) = player.hand_mut().take_to_place(letter) else {
            writeln!(
                out,
                "You do not have a tile with the letter {}. Please choose another from your hand.",
                letter
            )?;
            return ui::render_hand(out, player.hand());
        };

        // The first move of a game may go anywhere.
        if self.board.is_empty() || self.board.is_placeable(position) {
            self.board.place(tile, position);
            staged.push((tile, position));
            if staged.len() == HAND_CAPACITY {
                *bingo = true;
            }
        } else {
            writeln!(
                out,
                "You cannot place a tile there! It must both be connected to another word and \
                 the location must be empty."
            )?;
            self.players[self.current].hand_mut().give(tile);
        }
        Ok(())
    }

    /// Attempt to commit the staged placements. Returns true when the turn
    /// is over; false leaves the player retrying from the prompt.
    fn close_turn<W: Write>(
        &mut self,
        staged: &mut Vec<(Tile, Position)>,
        bingo: &mut bool,
        out: &mut W,
    ) -> io::Result<bool> {
        let discovery = self.board.discover_words();

        if let Some(dictionary) = &self.dictionary {
            let invalid: Vec<String> = discovery
                .new_words
                .iter()
                .map(|run| run.iter().map(|t| t.letter).collect::<String>())
                .filter(|word| !dictionary.contains(word))
                .collect();

            if !invalid.is_empty() {
                for word in &invalid {
                    writeln!(out, "{} is not a valid word!", word)?;
                }
                self.rollback(staged);
                *bingo = false;
                writeln!(out, "Please re-enter tiles, so that the placement is valid.")?;
                return ui::render_hand(out, self.players[self.current].hand()).map(|()| false);
            }
        }

        if *bingo {
            ui::render_bingo(out)?;
            self.players[self.current].add_points(BINGO_BONUS);
        }

        // A tile shared by an intersecting pair of words appears in both
        // runs and is counted once per word.
        let word_points: i32 = discovery
            .new_words
            .iter()
            .flatten()
            .map(|tile| tile.value)
            .sum();
        self.players[self.current].add_points(word_points);

        self.board.set_words_placed(discovery.all_words);
        Ok(true)
    }

    /// Undo every staged placement: tiles go back to the hand, cells go
    /// back to vacant.
    fn rollback(&mut self, staged: &mut Vec<(Tile, Position)>) {
        for (tile, _) in staged.iter() {
            self.players[self.current].hand_mut().give(*tile);
        }
        for (_, position) in staged.iter() {
            self.board.remove(*position);
        }
        staged.clear();
    }

    /// Swap one hand tile for the front of the bag. Ends the turn when the
    /// letter was actually held.
    fn replace_tile<W: Write>(&mut self, letter: char, out: &mut W) -> io::Result<bool> {
        let Some(tile) = self.players[self.current].hand_mut().take_to_replace(letter) else {
            writeln!(out, "You do not have tile {} in your hand.", letter)?;
            return Ok(false);
        };

        let fresh = self.bag.exchange(tile);
        self.players[self.current].hand_mut().give(fresh);
        Ok(true)
    }

    fn report_staged_restriction<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "You cannot pass or replace if you have already placed tile(s)!\nPlease use \
             \"place done\" instead."
        )
    }

    /// Top up the acting player's hand after their turn. A bag that can
    /// cover a full hand always refills; a smaller bag only refills while
    /// the game is still in progress.
    fn refill(&mut self, in_progress: bool) {
        let held = self.players[self.current].hand().size();
        if held >= HAND_CAPACITY {
            return;
        }

        let want = HAND_CAPACITY - held;
        if self.bag.len() > HAND_CAPACITY {
            let tiles = self.bag.draw(want);
            self.players[self.current].hand_mut().give_all(tiles);
        } else if in_progress {
            let tiles = self.bag.draw(want.min(self.bag.len()));
            self.players[self.current].hand_mut().give_all(tiles);
        }
    }

    /// Checked once per closed turn, never mid-turn.
    fn is_over(&self) -> bool {
        let bag_and_hand_empty =
            self.bag.is_empty() && self.players.iter().any(|p| p.hand().is_empty());
        bag_and_hand_empty
            || self
                .players
                .iter()
                .any(|p| p.hand().passed_twice_in_a_row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bag;
    use crate::save::Serialize as _;
    use std::io::Cursor;

    /// Build a deterministic game: the bag is dealt in distribution order,
    /// no shuffle.
    fn game_from(distribution: &str, dictionary: Option<Dictionary>) -> Game {
        let (bag, values) = bag::parse_distribution(distribution).unwrap();
        Game::new(
            vec!["AA".to_string(), "BB".to_string()],
            bag,
            values,
            Board::new(15, false),
            dictionary,
        )
    }

    fn run_script(game: &mut Game, script: &str) -> (SessionEnd, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let end = game.run(&mut input, &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    fn letters(tiles: &[Tile]) -> Vec<char> {
        let mut letters: Vec<char> = tiles.iter().map(|t| t.letter).collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn single_tile_on_an_empty_board_scores_nothing() {
        // Bag A 1 9, B 3 2: AA draws seven A's, BB draws A A B B, bag empty.
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (end, _) = run_script(&mut game, "place A at H7\nplace done\n");

        assert_eq!(end, SessionEnd::Aborted);
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(game.players()[0].hand().size(), 6);
        assert_eq!(game.board().tile(Position::new(7, 7)), Tile::new('A', 1));
        assert!(game.board().words_placed().is_empty());
    }

    #[test]
    fn a_placed_word_scores_its_tile_values() {
        let mut game = game_from("C 3 1\nA 1 1\nT 1 1\nX 8 4\nY 4 4\nZ 10 3\n", None);
        let (_, _) = run_script(
            &mut game,
            "place C at H6\nplace A at H7\nplace T at H8\nplace done\n",
        );

        assert_eq!(game.players()[0].score(), 5);
        assert_eq!(game.board().words_placed(), ["CAT".to_string()]);
    }

    #[test]
    fn placing_a_full_hand_awards_the_bingo_bonus() {
        let mut game = game_from("A 1 7\nB 3 7\n", None);
        let script = "place A at H0\nplace A at H1\nplace A at H2\nplace A at H3\n\
                      place A at H4\nplace A at H5\nplace A at H6\nplace done\n";
        let (end, out) = run_script(&mut game, script);

        // 7 tiles at 1 point each plus the 50-point bonus; the bag and AA's
        // hand are now both empty, which also ends the game.
        assert_eq!(game.players()[0].score(), 57);
        assert!(out.contains("BINGO!!!"));
        assert_eq!(end, SessionEnd::GameOver);
    }

    #[test]
    fn failed_word_validation_rolls_everything_back() {
        let dictionary = Dictionary::from_text("cat\n");
        let mut game = game_from("C 3 1\nX 8 1\nA 1 12\n", Some(dictionary));
        let before = letters(game.players()[0].hand().tiles());

        let (_, out) = run_script(
            &mut game,
            "place C at H7\nplace X at H8\nplace done\npass\n",
        );

        assert!(out.contains("CX is not a valid word!"));
        assert!(out.contains("Please re-enter tiles"));
        assert!(game.board().is_empty());
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(letters(game.players()[0].hand().tiles()), before);
        assert!(game.board().words_placed().is_empty());
    }

    #[test]
    fn validation_failure_also_cancels_a_pending_bingo() {
        let dictionary = Dictionary::from_text("zz\n");
        let mut game = game_from("A 1 7\nB 3 7\n", Some(dictionary));
        let script = "place A at H0\nplace A at H1\nplace A at H2\nplace A at H3\n\
                      place A at H4\nplace A at H5\nplace A at H6\nplace done\npass\n";
        let (_, out) = run_script(&mut game, script);

        assert!(out.contains("AAAAAAA is not a valid word!"));
        assert!(!out.contains("BINGO"));
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(game.players()[0].hand().size(), 7);
    }

    #[test]
    fn place_done_with_nothing_staged_is_rejected() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(&mut game, "place done\npass\n");

        assert!(out.contains("Nice try!"));
        // The turn then ended with the pass, so BB was prompted next.
        assert_eq!(game.current_player().name(), "BB");
    }

    #[test]
    fn pass_and_replace_are_locked_after_a_placement() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(&mut game, "place A at H7\npass\nreplace A\nplace done\n");

        assert!(out.contains("You cannot pass or replace"));
        assert_eq!(game.players()[0].hand().size(), 6);
    }

    #[test]
    fn replace_swaps_through_the_bag() {
        // AA draws seven A's, BB draws A plus six B's, bag keeps two B's.
        let mut game = game_from("A 1 8\nB 3 8\n", None);
        let (_, _) = run_script(&mut game, "replace A\n");

        let hand = letters(game.players()[0].hand().tiles());
        assert_eq!(hand, vec!['A', 'A', 'A', 'A', 'A', 'A', 'B']);
        assert_eq!(
            game.bag().tiles(),
            &[Tile::new('B', 3), Tile::new('A', 1)]
        );
    }

    #[test]
    fn replace_with_an_unheld_letter_keeps_the_turn_open() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(&mut game, "replace Z\npass\n");

        assert!(out.contains("You do not have tile Z in your hand."));
        assert_eq!(game.current_player().name(), "BB");
    }

    #[test]
    fn unconnected_placements_are_refused() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(
            &mut game,
            "place A at H7\nplace A at A0\nplace done\n",
        );

        assert!(out.contains("You cannot place a tile there!"));
        assert_eq!(game.board().tile(Position::new(0, 0)), Tile::EMPTY);
        // One tile placed, one refused and returned.
        assert_eq!(game.players()[0].hand().size(), 6);
    }

    #[test]
    fn letters_missing_from_the_hand_are_refused() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(&mut game, "place Z at H7\npass\n");

        assert!(out.contains("You do not have a tile with the letter Z."));
        assert_eq!(game.players()[0].hand().size(), 7);
    }

    #[test]
    fn end_of_input_mid_staging_rolls_back_first() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (end, _) = run_script(&mut game, "place A at H7\n");

        assert_eq!(end, SessionEnd::Aborted);
        assert!(game.board().is_empty());
        assert_eq!(game.players()[0].hand().size(), 7);
    }

    #[test]
    fn quit_ends_the_session_without_game_over() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (end, out) = run_script(&mut game, "quit\n");

        assert_eq!(end, SessionEnd::Quit);
        assert!(!out.contains("Game over"));
    }

    #[test]
    fn two_consecutive_passes_by_one_player_end_the_game() {
        let mut game = game_from("A 1 20\n", None);
        let (end, out) = run_script(&mut game, "pass\npass\npass\n");

        assert_eq!(end, SessionEnd::GameOver);
        assert!(out.contains("Game over"));
    }

    #[test]
    fn an_empty_bag_and_an_empty_hand_end_the_game() {
        // Eleven tiles: AA holds seven, BB four, bag empty. AA plays the
        // whole hand down to empty over two turns? One bingo turn empties it.
        let mut game = game_from("A 1 7\nB 3 4\n", None);
        let script = "place A at H0\nplace A at H1\nplace A at H2\nplace A at H3\n\
                      place A at H4\nplace A at H5\nplace A at H6\nplace done\n";
        let (end, _) = run_script(&mut game, script);

        assert_eq!(end, SessionEnd::GameOver);
        assert!(game.bag().is_empty());
        assert!(game.players()[0].hand().is_empty());
    }

    #[test]
    fn a_full_bag_tops_the_hand_back_up() {
        let (bag, values) = bag::standard();
        let mut game = Game::new(
            vec!["AA".to_string(), "BB".to_string()],
            bag,
            values,
            Board::new(15, false),
            None,
        );
        let (_, _) = run_script(&mut game, "place A at H7\nplace done\n");

        assert_eq!(game.players()[0].hand().size(), HAND_CAPACITY);
        assert_eq!(game.bag().len(), 98 - 14 - 1);
    }

    #[test]
    fn malformed_commands_reprompt_without_consuming_the_turn() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, out) = run_script(
            &mut game,
            "placing A at H7\nplace A to H7\nplace A at Z9\nplace 3 at H7\npass\n",
        );

        assert!(out.contains("Invalid syntax"));
        assert!(out.contains("not a valid location"));
        assert!(out.contains("not a valid letter"));
        assert_eq!(game.players()[0].hand().size(), 7);
        assert_eq!(game.current_player().name(), "BB");
    }

    #[test]
    fn the_turn_rotation_survives_a_save_and_load() {
        let mut game = game_from("A 1 9\nB 3 2\n", None);
        let (_, _) = run_script(&mut game, "pass\n");
        assert_eq!(game.current_player().name(), "BB");
        assert_eq!(game.rotation_names(), vec!["BB", "AA"]);

        let data = save::parse(&game.serialize(), 15).unwrap();
        let reloaded = Game::from_save(data, false, None).unwrap();
        assert_eq!(reloaded.current_player().name(), "BB");
        assert_eq!(reloaded.rotation_names(), vec!["BB", "AA"]);
    }

    #[test]
    fn shared_tiles_count_once_per_new_word() {
        // AA's hand in deal order: C A A T T Z Z.
        let mut game = game_from("C 3 1\nA 1 2\nT 1 2\nZ 10 9\n", None);
        // Turn one: CAT across row H. Turn two (after BB passes): T and A
        // under the C and A, forming CT, AA and TA in a single closing.
        let script = "place C at H6\nplace A at H7\nplace T at H8\nplace done\n\
                      pass\n\
                      place T at I6\nplace A at I7\nplace done\n";
        let (_, _) = run_script(&mut game, script);

        // CAT = 5, then CT (3+1) + AA (1+1) + TA (1+1) = 8: the T at I6 is
        // counted in both CT and TA, the A at I7 in both AA and TA.
        assert_eq!(game.players()[0].score(), 13);
    }

    #[test]
    fn a_repeated_word_string_is_never_rescored() {
        // AA's hand in deal order: C C A T T Z Z.
        let mut game = game_from("C 3 2\nA 1 1\nT 1 2\nZ 10 2\nX 8 7\n", None);
        // Turn two spells CAT again, vertically through the shared A. The
        // run is new on the board but its string is already known, so it
        // scores nothing: the accumulated list is string-based.
        let script = "place C at H6\nplace A at H7\nplace T at H8\nplace done\n\
                      pass\n\
                      place C at G7\nplace T at I7\nplace done\n";
        let (_, _) = run_script(&mut game, script);

        assert_eq!(game.players()[0].score(), 5);
        assert_eq!(
            game.board().words_placed(),
            ["CAT".to_string(), "CAT".to_string()]
        );
    }
}

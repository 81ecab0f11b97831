//! The in-turn command grammar
//!
//! One line per command, tokenized on single spaces, keywords
//! case-insensitive, exact token counts. Letter and location arguments are
//! uppercase; validation runs syntax first, then letter format, then
//! location format, mirroring the order the player is corrected in.

use crate::board::Position;

/// A syntactically valid command. Semantic checks (tile in hand, cell
/// placeable, zero-staged restrictions) happen in the turn engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `place <LETTER> at <LOC>`
    Place { letter: char, position: Position },
    /// `place done`
    PlaceDone,
    /// `replace <LETTER>`
    Replace { letter: char },
    /// `pass`
    Pass,
    /// `save <FILENAME>`
    Save { filename: String },
    /// `quit`
    Quit,
}

/// Why a command line was rejected before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown keyword or wrong token count.
    Syntax,
    /// A letter argument that is not a single A-Z character.
    Letter,
    /// A location argument outside the board.
    Location,
}

impl ParseError {
    /// The correction shown to the player. Location bounds depend on the
    /// board size.
    pub fn message(&self, board_size: usize) -> String {
        let max_row = (b'A' + board_size as u8 - 1) as char;
        let max_col = board_size - 1;
        match self {
            ParseError::Syntax => "Invalid syntax. You may only enter the following commands:\n\
                 1. \"place [letter] at [location]\", where letter = character and location = string (i.e., C3).\n\
                 2. \"replace [letter]\", where letter = character.\n\
                 3. \"pass\""
                .to_string(),
            ParseError::Letter => {
                "That is not a valid letter. Please enter a letter between A-Z.".to_string()
            }
            ParseError::Location => format!(
                "That is not a valid location. Please enter a letter between A-{max_row}, \
                 followed by a number between 0-{max_col} (i.e., B9 or F0 or M11)"
            ),
        }
    }
}

/// Parse one input line against the board size.
pub fn parse(line: &str, board_size: usize) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();

    match tokens.as_slice() {
        [keyword, letter, at, location] if is_keyword(keyword, "place") && is_keyword(at, "at") => {
            let letter = parse_letter(letter)?;
            let position =
                Position::parse(location, board_size).ok_or(ParseError::Location)?;
            Ok(Command::Place { letter, position })
        }
        [keyword, done] if is_keyword(keyword, "place") && is_keyword(done, "done") => {
            Ok(Command::PlaceDone)
        }
        [keyword, letter] if is_keyword(keyword, "replace") => {
            let letter = parse_letter(letter)?;
            Ok(Command::Replace { letter })
        }
        [keyword] if is_keyword(keyword, "pass") => Ok(Command::Pass),
        [keyword, filename] if is_keyword(keyword, "save") => Ok(Command::Save {
            filename: filename.to_string(),
        }),
        [keyword] if is_keyword(keyword, "quit") => Ok(Command::Quit),
        _ => Err(ParseError::Syntax),
    }
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

/// A tile argument must be exactly one uppercase letter.
fn parse_letter(token: &str) -> Result<char, ParseError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_uppercase() => Ok(letter),
        _ => Err(ParseError::Letter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_place_command() {
        assert_eq!(
            parse("place A at H7", 15),
            Ok(Command::Place {
                letter: 'A',
                position: Position::new(7, 7)
            })
        );
        assert_eq!(
            parse("PLACE Q AT O14", 15),
            Ok(Command::Place {
                letter: 'Q',
                position: Position::new(14, 14)
            })
        );
    }

    #[test]
    fn keywords_are_case_insensitive_but_arguments_are_not() {
        assert_eq!(parse("Place Done", 15), Ok(Command::PlaceDone));
        assert_eq!(parse("pAsS", 15), Ok(Command::Pass));
        assert_eq!(parse("place a at H7", 15), Err(ParseError::Letter));
        assert_eq!(parse("place A at h7", 15), Err(ParseError::Location));
    }

    #[test]
    fn token_counts_are_exact() {
        assert_eq!(parse("place", 15), Err(ParseError::Syntax));
        assert_eq!(parse("place A at H7 now", 15), Err(ParseError::Syntax));
        assert_eq!(parse("pass please", 15), Err(ParseError::Syntax));
        assert_eq!(parse("save", 15), Err(ParseError::Syntax));
        assert_eq!(parse("", 15), Err(ParseError::Syntax));
        // Double spaces produce empty tokens, which fail the shape check.
        assert_eq!(parse("place  A at H7", 15), Err(ParseError::Syntax));
    }

    #[test]
    fn letter_arguments_are_single_characters() {
        assert_eq!(parse("replace AB", 15), Err(ParseError::Letter));
        assert_eq!(parse("replace 4", 15), Err(ParseError::Letter));
        assert_eq!(parse("replace Z", 15), Ok(Command::Replace { letter: 'Z' }));
    }

    #[test]
    fn locations_are_bounds_checked() {
        assert_eq!(parse("place A at P0", 15), Err(ParseError::Location));
        assert_eq!(parse("place A at A15", 15), Err(ParseError::Location));
        assert_eq!(parse("place A at 77", 15), Err(ParseError::Location));
        assert_eq!(parse("place A at B1x", 15), Err(ParseError::Location));
    }

    #[test]
    fn save_and_quit_parse() {
        assert_eq!(
            parse("save mygame.txt", 15),
            Ok(Command::Save {
                filename: "mygame.txt".to_string()
            })
        );
        assert_eq!(parse("QUIT", 15), Ok(Command::Quit));
    }

    #[test]
    fn letter_is_checked_before_location() {
        assert_eq!(parse("place 9 at Z99", 15), Err(ParseError::Letter));
    }
}
